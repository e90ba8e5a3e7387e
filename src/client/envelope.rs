//! Response shape adapters.
//!
//! List routes relay whatever the backend sends, which has been seen as a
//! bare array, `{ "data": [...] }` or `{ "users": [...] }`. This is the only
//! place that tolerates the variation; callers always get a `Vec<T>`.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Normalize a list response. Unrecognized shapes yield an empty list.
///
/// # Errors
///
/// Returns an error if a recognized list holds items that do not fit `T`.
pub fn normalize_list<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, serde_json::Error> {
    let items = match value {
        Value::Array(_) => value,
        Value::Object(mut map) => {
            let listed = map
                .remove("data")
                .filter(Value::is_array)
                .or_else(|| map.remove("users").filter(Value::is_array));
            match listed {
                Some(items) => items,
                None => return Ok(Vec::new()),
            }
        }
        _ => return Ok(Vec::new()),
    };
    serde_json::from_value(items)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SingleEnvelope<T> {
    Data { data: T },
    Bare(T),
}

/// Unwrap a single entity that may arrive as `{ "data": {...} }`.
///
/// # Errors
///
/// Returns an error if neither shape deserializes into `T`.
pub fn normalize_single<T: DeserializeOwned>(value: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value::<SingleEnvelope<T>>(value).map(|envelope| match envelope {
        SingleEnvelope::Data { data } | SingleEnvelope::Bare(data) => data,
    })
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
