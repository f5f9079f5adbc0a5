//! Core data types for the storage layer.
//!
//! Field names are persisted in camelCase so the stored layout matches the
//! extension's `quickNotes` array.

use serde::{Deserialize, Serialize};

/// A single note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Opaque unique identifier, fixed at creation
    pub id: String,

    /// Sanitized note text
    pub content: String,

    /// Creation time in epoch milliseconds
    pub created_at: i64,

    /// Last content change in epoch milliseconds, never before `created_at`
    pub updated_at: i64,
}

impl Note {
    /// Whether the note has been edited since it was created.
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Storage usage numbers for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    /// Number of notes in the collection
    pub notes_count: usize,

    /// Approximate size of the serialized storage partition
    pub storage_bytes_used: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_serializes_camel_case() {
        let note = Note {
            id: "abc".to_string(),
            content: "hello".to_string(),
            created_at: 10,
            updated_at: 20,
        };
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "abc",
                "content": "hello",
                "createdAt": 10,
                "updatedAt": 20,
            })
        );
        assert!(note.is_edited());
    }

    #[test]
    fn test_note_ignores_unknown_fields() {
        let value = serde_json::json!({
            "id": "abc",
            "content": "hello",
            "createdAt": 10,
            "updatedAt": 10,
            "pinned": true,
        });
        let note: Note = serde_json::from_value(value).unwrap();
        assert_eq!(note.id, "abc");
        assert!(!note.is_edited());
    }
}
