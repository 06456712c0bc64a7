//! Typed JSON values on top of the string store.
//!
//! Reads fail soft: a missing key, a value that is not JSON, or JSON that is
//! not an array all read as an empty list. Array elements that do not fit
//! the expected shape are skipped one by one, so a single bad entry written
//! by another view does not hide the rest.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::StoreError;
use crate::store::KeyValueStore;

/// Reads a JSON array stored under `key`.
pub fn load_json_array<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored value");
            return Vec::new();
        }
    };

    let elements = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Array(elements)) => elements,
        // `JSON.parse` of a literal null also reads as "nothing stored"
        Ok(Value::Null) => return Vec::new(),
        Ok(other) => {
            warn!(key, found = json_kind(&other), "Stored value is not an array");
            return Vec::new();
        }
        Err(e) => {
            warn!(key, error = %e, "Stored value is not valid JSON");
            return Vec::new();
        }
    };

    decode_elements(key, elements)
}

/// Deserializes the elements of a stored array, skipping and logging the
/// ones that do not fit `T`.
pub(crate) fn decode_elements<T: DeserializeOwned>(key: &str, elements: Vec<Value>) -> Vec<T> {
    let total = elements.len();
    let items: Vec<T> = elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| match serde_json::from_value(element) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(key, index, error = %e, "Skipping malformed stored entry");
                None
            }
        })
        .collect();

    if items.len() < total {
        warn!(key, kept = items.len(), total, "Dropped malformed entries");
    }
    items
}

/// Serializes `value` compactly and stores it under `key`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StoreError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let text = serde_json::to_string(value).map_err(|e| StoreError::serialize(key, e))?;
    store.set(key, &text)
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
