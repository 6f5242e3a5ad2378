//! JSON rendering of the object model.
//!
//! Thin wrappers around `serde_json` using the [`Value`] serde
//! implementations. JSON cannot express every scalar kind, so the trip
//! through JSON is lossy where the XML trip is not:
//!
//! | Object model | JSON |
//! |--------------|------|
//! | numeric key `1` | `"1"` |
//! | `Value::Bytes` | base64 string |
//! | `Value::Tuple` | array |
//! | `Value::None` | `null` |
//! | `Value::Float(NaN)` | `null` |
use crate::error::Result;
use crate::value::Value;

/// Deserialize an object model from a JSON string.
///
/// # Examples
///
/// ```
/// use helios_xmldict::json::from_json_str;
///
/// let value = from_json_str(r#"{"root": {"k": [1, 2]}}"#).unwrap();
/// assert!(value.get("root").is_some());
/// ```
pub fn from_json_str(s: &str) -> Result<Value> {
    Ok(serde_json::from_str(s)?)
}

/// Deserialize an object model from a JSON byte slice.
pub fn from_json_slice(v: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(v)?)
}

/// Convert a `serde_json::Value` into an object model.
pub fn from_json_value(value: serde_json::Value) -> Result<Value> {
    Ok(serde_json::from_value(value)?)
}

/// Serialize an object model to a JSON string.
///
/// # Examples
///
/// ```
/// use helios_xmldict::{Key, Value, json::to_json_string};
///
/// let value = Value::mapping([(Key::Int(1), Value::tuple([1, 2]))]);
/// assert_eq!(to_json_string(&value).unwrap(), r#"{"1":[1,2]}"#);
/// ```
pub fn to_json_string(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Serialize an object model to a pretty-printed JSON string.
pub fn to_json_string_pretty(value: &Value) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Serialize an object model to a JSON byte vector.
pub fn to_json_vec(value: &Value) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Convert an object model to a `serde_json::Value`.
pub fn to_json_value(value: &Value) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}
