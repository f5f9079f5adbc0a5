//! In-memory key-value store.
//!
//! [`MemoryStore`] keeps entries in a `BTreeMap` behind a lock. Data is lost
//! when the process exits; it backs tests and throwaway sessions.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{NotesError, Result};
use crate::storage::traits::{KeyQuery, KeyValueStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> NotesError {
        NotesError::StorageUnavailable("Memory store lock poisoned".to_string())
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, query: KeyQuery) -> Result<HashMap<String, Value>> {
        let entries = self.entries.read().map_err(|_| Self::poisoned())?;
        Ok(entries
            .iter()
            .filter(|(key, _)| query.matches(key))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect())
    }

    async fn set(&self, items: HashMap<String, Value>) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        entries.extend(items);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| Self::poisoned())?;
        for key in keys {
            entries.remove(*key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set_one("a", json!([1, 2])).await.unwrap();
        store.set_one("b", json!("x")).await.unwrap();

        assert_eq!(store.get_one("a").await.unwrap(), Some(json!([1, 2])));
        assert_eq!(store.get(KeyQuery::All).await.unwrap().len(), 2);

        store.remove(&["a", "missing"]).await.unwrap();
        assert_eq!(store.get_one("a").await.unwrap(), None);
        assert_eq!(store.get_one("b").await.unwrap(), Some(json!("x")));
    }

    #[tokio::test]
    async fn test_get_skips_absent_keys() {
        let store = MemoryStore::new();
        store.set_one("a", json!(1)).await.unwrap();

        let found = store
            .get(KeyQuery::Keys(vec!["a".to_string(), "nope".to_string()]))
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found["a"], json!(1));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set_one("a", json!(1)).await.unwrap();
        store.set_one("a", json!(2)).await.unwrap();
        assert_eq!(store.get_one("a").await.unwrap(), Some(json!(2)));
    }
}
