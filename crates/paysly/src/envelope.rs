use serde_json::{Map, Value};

use crate::error::PayslyError;

/// Split a `{ success, ...payload }` body.
///
/// A truthy `success` resolves with the payload, anything else rejects with
/// it as [`PayslyError::Declined`]. `success` itself is dropped either way.
pub fn unwrap_envelope(body: Value) -> Result<Map<String, Value>, PayslyError> {
    let mut payload = match body {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let success = payload.remove("success").is_some_and(|v| is_truthy(&v));

    if !success {
        return Err(PayslyError::Declined(payload));
    }
    Ok(payload)
}

/// JavaScript truthiness, which is what the backend's flag is written for.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
