use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{EntityId, timestamp};

// ── Gender ──────────────────────────────────────────────────────────

/// Audience gender filter. Wire values: `"m"`, `"f"`, `"any"`.
///
/// Older records use `"mf"`, `"both"` or `"ambos"` for `Any`; unknown
/// values are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Any,
    Other(String),
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Male => "m",
            Self::Female => "f",
            Self::Any => "any",
            Self::Other(s) => s,
        }
    }

    /// Human label for tables.
    pub fn label(&self) -> String {
        match self {
            Self::Male => "HOMBRE".into(),
            Self::Female => "MUJER".into(),
            Self::Any => "AMBOS".into(),
            Self::Other(s) => s.to_uppercase(),
        }
    }
}

impl From<String> for Gender {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "m" => Self::Male,
            "f" => Self::Female,
            "any" | "mf" | "both" | "ambos" => Self::Any,
            _ => Self::Other(raw),
        }
    }
}

impl From<Gender> for String {
    fn from(g: Gender) -> Self {
        g.as_str().to_owned()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Segment ─────────────────────────────────────────────────────────

/// An audience segment: which campaign to show to which group/demographic.
///
/// `campaign_id` is a soft reference, resolved for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: EntityId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub campaign_id: Option<EntityId>,
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub min_age: Option<f64>,
    #[serde(default)]
    pub max_age: Option<f64>,
    #[serde(default, with = "timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// POST body for a new segment, produced by `SegmentForm::validate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSegment {
    pub name: String,
    pub campaign_id: EntityId,
    pub group_name: String,
    pub gender: Gender,
    pub min_age: f64,
    pub max_age: f64,
}

/// Partial update: only `Some` fields are merged and sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SegmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_age: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_age: Option<f64>,
}

impl From<NewSegment> for SegmentPatch {
    fn from(s: NewSegment) -> Self {
        Self {
            name: Some(s.name),
            campaign_id: Some(s.campaign_id),
            group_name: Some(s.group_name),
            gender: Some(s.gender),
            min_age: Some(s.min_age),
            max_age: Some(s.max_age),
        }
    }
}
