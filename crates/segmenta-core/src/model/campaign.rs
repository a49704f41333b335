use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{EntityId, timestamp};

/// A marketing campaign. Timestamps are server-controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Slug; defaults to the kebab-cased name on creation.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Campaign {
    pub fn is_active(&self) -> bool {
        self.active.unwrap_or(false)
    }
}

/// POST body for a new campaign.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCampaign {
    pub name: String,
    pub description: String,
    pub url: String,
    pub active: bool,
}

/// Partial update: only `Some` fields are merged and sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CampaignPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl CampaignPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
