//! Request payload extraction.
//!
//! Request bodies arrive as `{"data": {...}}`. Payload structs read the
//! inner object leniently so that extraction itself never fails: every shape
//! problem is left for the validator chain, which reports them in order.

use log::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Extract a typed payload from a request body envelope.
///
/// A missing body, a missing `data` member, or a `data` value that is not
/// an object yields `T::default()`.
pub fn payload_from_body<T>(body: Option<&Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match body.and_then(|b| b.get("data")) {
        Some(data @ Value::Object(_)) => match serde_json::from_value(data.clone()) {
            Ok(payload) => payload,
            Err(e) => {
                debug!("Falling back to empty payload: {}", e);
                T::default()
            }
        },
        _ => T::default(),
    }
}

/// Read an optional text field.
///
/// Strings are taken as-is and numbers as their decimal text. Every other
/// JSON type, and `null`, reads as absent.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Whether a JSON value counts as present.
///
/// `null`, `false`, zero and the empty string are absent; arrays and objects
/// are always present.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Non-empty text, or `None`.
pub(crate) fn present_text(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// A JSON number with an integral value in `1..=u32::MAX`, or `None`.
///
/// `12.0` counts as an integer; `12.5` does not.
pub(crate) fn positive_integer(value: &Value) -> Option<u32> {
    let number = match value {
        Value::Number(n) => n,
        _ => return None,
    };
    let integral = match number.as_u64() {
        Some(n) => n,
        None => {
            let f = number.as_f64().filter(|f| f.fract() == 0.0 && *f >= 1.0)?;
            if f > f64::from(u32::MAX) {
                return None;
            }
            f as u64
        }
    };
    u32::try_from(integral).ok().filter(|n| *n > 0)
}
