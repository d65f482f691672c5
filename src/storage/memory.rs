//! In-process store.

use super::{validate_key, Store, StorageError};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Store that keeps values as JSON in memory.
///
/// Values survive as long as the store does. Hand the store from one session
/// to the next to simulate a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw JSON stored under `key`.
    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Place raw JSON under `key`, bypassing serialization.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: Value) {
        self.entries.insert(key.into(), value);
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, StorageError> {
        validate_key(key)?;
        match self.entries.get(key) {
            Some(value) => serde_json::from_value(value.clone())
                .map_err(|e| StorageError::DeserializationFailed(e.to_string())),
            None => Ok(default),
        }
    }

    fn set<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        validate_key(key)?;
        let value = serde_json::to_value(value)
            .map_err(|e| StorageError::SerializationFailed(e.to_string()))?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_key_returns_default() {
        let store = MemoryStore::new();
        let value: Vec<String> = store.get("cart", vec!["x".to_string()]).unwrap();
        assert_eq!(value, vec!["x".to_string()]);
    }

    #[test]
    fn set_then_get_returns_value() {
        let mut store = MemoryStore::new();
        store.set("cart", &vec![1u32, 2, 3]).unwrap();

        let value: Vec<u32> = store.get("cart", Vec::new()).unwrap();
        assert_eq!(value, vec![1, 2, 3]);
        assert_eq!(store.raw("cart"), Some(&json!([1, 2, 3])));
    }

    #[test]
    fn set_replaces_previous_value() {
        let mut store = MemoryStore::new();
        store.set("cart", &1u32).unwrap();
        store.set("cart", &2u32).unwrap();

        assert_eq!(store.get("cart", 0u32).unwrap(), 2);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn mismatched_type_is_deserialization_error() {
        let mut store = MemoryStore::new();
        store.insert_raw("cart", json!({"not": "a list"}));

        let result: Result<Vec<u32>, _> = store.get("cart", Vec::new());
        assert!(matches!(result, Err(StorageError::DeserializationFailed(_))));
    }

    #[test]
    fn invalid_key_is_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(
            store.set("../cart", &1u32),
            Err(StorageError::InvalidKey(_))
        ));
        assert!(store.is_empty());
    }
}
