use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::EntityId;

/// A network router in the inventory.
///
/// `group_name` is a free-form label; an empty string means unassigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Router {
    pub id: EntityId,
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub estacion: Option<String>,
    #[serde(default)]
    pub municipio: Option<String>,
    #[serde(default)]
    pub latitud: Option<f64>,
    #[serde(default)]
    pub longitud: Option<f64>,
    #[serde(default)]
    pub group_name: Option<String>,
    /// Backend fields this model does not name, kept so merges lose nothing.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Router {
    /// The assigned group, or `None` when empty or absent.
    pub fn group(&self) -> Option<&str> {
        self.group_name.as_deref().filter(|g| !g.is_empty())
    }
}

/// POST body for a new router, produced by `RouterForm::validate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRouter {
    pub serial: String,
    pub mac: String,
    pub device_name: String,
    pub estacion: String,
    pub municipio: String,
    pub latitud: f64,
    pub longitud: f64,
    pub group_name: String,
}

/// Partial update: only `Some` fields are merged and sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RouterPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitud: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitud: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl RouterPatch {
    /// Group-only patch.
    pub fn group(group_name: impl Into<String>) -> Self {
        Self {
            group_name: Some(group_name.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_sparse_router_and_keeps_unknown_fields() {
        let r: Router = serde_json::from_value(json!({
            "id": 3,
            "mac": "aa:bb:cc:dd:ee:ff",
            "latitud": 19.43,
            "firmware": "1.2.3"
        }))
        .unwrap();

        assert_eq!(r.id, EntityId::Numeric(3));
        assert_eq!(r.latitud, Some(19.43));
        assert!(r.device_name.is_none());
        assert_eq!(r.extra.get("firmware"), Some(&json!("1.2.3")));
    }

    #[test]
    fn empty_group_is_unassigned() {
        let r: Router = serde_json::from_value(json!({ "id": 1, "group_name": "" })).unwrap();
        assert_eq!(r.group(), None);
    }

    #[test]
    fn group_patch_serializes_only_group() {
        let patch = RouterPatch::group("B");
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "group_name": "B" }));
        assert!(RouterPatch::default().is_empty());
    }
}
