//! Tolerant field (de)serializers for model-produced JSON
//!
//! Models routinely answer `"5"` where a number was asked for, a number where
//! a string was asked for, or `null` for fields they had nothing to say about.
//! None of these deserializers fail. The `optional_*` forms read `null` as
//! absent and coerce anything else inside the `Some`; the plain forms fall back
//! to the type's default.

use serde::Serializer;
use serde::de::{Deserialize, DeserializeOwned, Deserializer};
use serde_json::Value;

use super::Priority;

// Largest f64 below which every integer is exactly representable
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn value<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

fn to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn to_list<T: DeserializeOwned>(value: Value) -> Option<Vec<T>> {
    match value {
        Value::Null => None,
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => Some(Vec::new()),
    }
}

/// Text from a string, number or bool; structured values keep their JSON text
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_string(value(deserializer)?).unwrap_or_default())
}

/// Elements of an array that deserialize as `T`; anything else is dropped
pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(to_list(value(deserializer)?).unwrap_or_default())
}

/// Like [`string`], with `null` read as absent
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(to_string(value(deserializer)?))
}

/// Like [`list`], with `null` read as absent
pub fn optional_list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(to_list(value(deserializer)?))
}

/// Hours from a number or a numeric string, zero for anything else present
pub fn optional_hours<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match value(deserializer)? {
        Value::Null => None,
        Value::Number(n) => Some(n.as_f64().unwrap_or(0.0)),
        Value::String(s) => Some(s.trim().parse::<f64>().unwrap_or(0.0)),
        _ => Some(0.0),
    })
}

/// Priority from any capitalisation of high/medium/low, medium for anything else present
pub fn optional_priority<'de, D>(deserializer: D) -> Result<Option<Priority>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match value(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s.parse().unwrap_or_default()),
        _ => Some(Priority::default()),
    })
}

/// Write whole hours as a JSON integer so `5` reads back as `5`, not `5.0`
pub fn serialize_hours<S>(hours: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match *hours {
        Some(h) if h.fract() == 0.0 && h.abs() <= MAX_EXACT_INTEGER => serializer.serialize_i64(h as i64),
        Some(h) => serializer.serialize_f64(h),
        None => serializer.serialize_none(),
    }
}
