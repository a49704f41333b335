// ── Payload shaping ──
//
// Mutation bodies travel as JSON objects. Outgoing payloads drop top-level
// `null` and `""` values; cached entities absorb patches and server
// responses by shallow key overlay, later keys winning.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::model::Resource;

/// Serialize `payload` into a JSON object.
pub(crate) fn to_object<P: Serialize + ?Sized>(payload: &P) -> Result<Map<String, Value>, CoreError> {
    match serde_json::to_value(payload)? {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::InvalidPayload {
            message: format!("expected a JSON object, got {}", kind(&other)),
        }),
    }
}

/// Drop top-level `null` and empty-string values. Nested values are kept
/// as-is.
pub(crate) fn clean(map: &Map<String, Value>) -> Map<String, Value> {
    map.iter()
        .filter(|(_, v)| !matches!(v, Value::Null) && v.as_str() != Some(""))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// `{...entity, ...overlay}`.
pub(crate) fn merge<T: Resource>(entity: &T, overlay: &Map<String, Value>) -> Result<T, CoreError> {
    let mut base = to_object(entity)?;
    for (key, value) in overlay {
        base.insert(key.clone(), value.clone());
    }
    Ok(serde_json::from_value(Value::Object(base))?)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
