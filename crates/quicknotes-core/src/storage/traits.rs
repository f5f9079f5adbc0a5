//! Key-value store trait definition.
//!
//! The `KeyValueStore` trait is the boundary between the notes core and
//! whatever persists its data. It mirrors a browser extension's local
//! storage area: string keys, JSON values, asynchronous calls, and no
//! atomicity across keys.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Which keys a [`KeyValueStore::get`] call should return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyQuery {
    /// Every stored entry.
    All,
    /// Only these keys; absent keys are left out of the result.
    Keys(Vec<String>),
}

impl KeyQuery {
    pub fn key(key: impl Into<String>) -> Self {
        KeyQuery::Keys(vec![key.into()])
    }

    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyQuery::All => true,
            KeyQuery::Keys(keys) => keys.iter().any(|k| k == key),
        }
    }
}

impl From<&str> for KeyQuery {
    fn from(key: &str) -> Self {
        KeyQuery::key(key)
    }
}

impl From<Vec<String>> for KeyQuery {
    fn from(keys: Vec<String>) -> Self {
        KeyQuery::Keys(keys)
    }
}

/// Asynchronous string-keyed JSON store.
///
/// All implementations must ensure:
/// - `set` replaces the whole value of each key it is given
/// - `remove` of an absent key is not an error
/// - I/O failures surface as `NotesError::StorageUnavailable`
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the entries selected by `query`.
    async fn get(&self, query: KeyQuery) -> Result<HashMap<String, Value>>;

    /// Write every entry in `items`.
    async fn set(&self, items: HashMap<String, Value>) -> Result<()>;

    /// Delete the given keys.
    async fn remove(&self, keys: &[&str]) -> Result<()>;

    /// Fetch a single key.
    async fn get_one(&self, key: &str) -> Result<Option<Value>> {
        let mut found = self.get(KeyQuery::key(key)).await?;
        Ok(found.remove(key))
    }

    /// Write a single key.
    async fn set_one(&self, key: &str, value: Value) -> Result<()> {
        let mut items = HashMap::with_capacity(1);
        items.insert(key.to_string(), value);
        self.set(items).await
    }
}
