//! JSON-file key-value store.
//!
//! The whole partition is one JSON object on disk. Every `set`/`remove`
//! rewrites the file through [`write_atomic`](crate::fs::write_atomic), so a
//! crash mid-write leaves the previous contents intact. Writes within one
//! process are serialized; separate processes get last-writer-wins.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::error::{NotesError, Result};
use crate::fs::write_atomic;
use crate::storage::traits::{KeyQuery, KeyValueStore};

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(err) => {
                return Err(NotesError::StorageUnavailable(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    err
                )))
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        match serde_json::from_slice::<Value>(&bytes)? {
            Value::Object(map) => Ok(map),
            _ => Err(NotesError::Serialization(format!(
                "Store file {} is not a JSON object",
                self.path.display()
            ))),
        }
    }

    async fn persist(&self, map: &Map<String, Value>) -> Result<()> {
        let contents = serde_json::to_vec_pretty(map)?;
        write_atomic(&self.path, &contents).await.map_err(|err| {
            NotesError::StorageUnavailable(format!(
                "Failed to write {}: {}",
                self.path.display(),
                err
            ))
        })
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, query: KeyQuery) -> Result<HashMap<String, Value>> {
        let map = self.load().await?;
        Ok(map
            .into_iter()
            .filter(|(key, _)| query.matches(key))
            .collect())
    }

    async fn set(&self, items: HashMap<String, Value>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        map.extend(items);
        self.persist(&map).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        let before = map.len();
        for key in keys {
            map.remove(*key);
        }
        if map.len() == before {
            return Ok(());
        }
        self.persist(&map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("notes.json"));
        assert!(store.get(KeyQuery::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");

        let store = FileStore::new(&path);
        store.set_one("quickNotes", json!([{"id": "1"}])).await.unwrap();
        store.set_one("other", json!(true)).await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get_one("quickNotes").await.unwrap(),
            Some(json!([{"id": "1"}]))
        );
        assert_eq!(reopened.get(KeyQuery::All).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_deletes_only_named_keys() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("notes.json"));
        store.set_one("a", json!(1)).await.unwrap();
        store.set_one("b", json!(2)).await.unwrap();

        store.remove(&["a"]).await.unwrap();

        assert_eq!(store.get_one("a").await.unwrap(), None);
        assert_eq!(store.get_one("b").await.unwrap(), Some(json!(2)));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.json");
        tokio::fs::write(&path, b"[1, 2, 3]").await.unwrap();

        let store = FileStore::new(&path);
        let err = store.get(KeyQuery::All).await.unwrap_err();
        assert!(matches!(err, NotesError::Serialization(_)));
    }
}
