//! Shared helpers for loosely typed descriptor values.

use serde_json::Value;

/// Truthiness of a descriptor value.
///
/// `null`, `false`, `0` and the empty string are falsy; arrays and objects are
/// always truthy, even when empty.
#[inline]
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text used when a value serves as a mapping key.
///
/// Strings are used verbatim; anything else uses its JSON text, so `5` keys
/// as `"5"`.
pub fn key_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
