//! Required-field checks run on a submitted payload before anything is persisted.

use serde_json::{Map, Value};

use shared_models::validation::ValidationError;

/// Whether a submitted value counts as "not provided".
///
/// Absent keys, `null`, `false`, `0`, blank strings and empty collections are
/// all treated as missing.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Fails with every missing field, in the order given by `required`.
pub fn require_fields(payload: &Map<String, Value>, required: &[&str]) -> Result<(), ValidationError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|field| payload.get(**field).map_or(true, is_blank))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(missing))
    }
}

/// A field that must be a JSON string. Presence is checked by [`require_fields`].
pub fn required_string(payload: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::invalid_type(
            field,
            format!("{} must be a string", field),
        )),
        None => Err(ValidationError::MissingFields(vec![field.to_string()])),
    }
}

/// Integer coercion: JSON integers, or strings that parse as one after trimming.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
