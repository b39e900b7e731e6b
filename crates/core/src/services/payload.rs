use serde_json::Value;

use crate::errors::CoreError;

/// Keys under which backends wrap the observation array.
pub const ENVELOPE_KEYS: &[&str] = &[
    "data", "items", "rates", "result", "results", "list", "content", "series",
];

const MAX_ENVELOPE_DEPTH: usize = 3;

/// Locate the record array in a decoded payload.
///
/// Accepts a bare array, or an object wrapping it (possibly twice, as in
/// `{"result": {"data": [...]}}`) under one of `ENVELOPE_KEYS`.
pub fn extract_records(payload: &Value) -> Result<&[Value], CoreError> {
    extract_at_depth(payload, 0)
}

fn extract_at_depth(payload: &Value, depth: usize) -> Result<&[Value], CoreError> {
    match payload {
        Value::Array(items) => Ok(items.as_slice()),
        Value::Object(map) if depth < MAX_ENVELOPE_DEPTH => ENVELOPE_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|inner| extract_at_depth(inner, depth + 1).ok())
            .ok_or_else(|| {
                CoreError::InvalidPayload(format!(
                    "object has no record array under any of: {}",
                    ENVELOPE_KEYS.join(", ")
                ))
            }),
        Value::Object(_) => Err(CoreError::InvalidPayload(
            "record array nested too deeply".into(),
        )),
        other => Err(CoreError::InvalidPayload(format!(
            "expected an array of records, got {}",
            kind_of(other)
        ))),
    }
}

/// Decode a JSON payload string, keeping the whole document.
pub fn parse_payload(json: &str) -> Result<Value, CoreError> {
    Ok(serde_json::from_str(json)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
