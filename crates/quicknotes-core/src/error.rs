//! Error types for Quick Notes core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors carry a human-readable reason; the CLI layer displays them as-is.
//! A missing note is not an error: lookups signal it through `Option`/`bool`.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias for notes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Core error type for notes operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Note content was rejected by the validator
    #[error("{0}")]
    InvalidContent(#[from] ValidationError),

    /// Too many actions of one kind inside the rate window
    #[error("Too many {action} actions. Please wait a moment.")]
    RateLimited { action: String },

    /// The collection already holds the maximum number of notes
    #[error("Maximum number of notes ({max}) reached")]
    StorageFull { max: usize },

    /// Read or write against the key-value store failed or timed out
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Persisted payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl NotesError {
    /// Whether the error came from the storage boundary rather than the caller's input.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            NotesError::StorageUnavailable(_) | NotesError::Serialization(_)
        )
    }
}

impl From<std::io::Error> for NotesError {
    fn from(err: std::io::Error) -> Self {
        NotesError::StorageUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for NotesError {
    fn from(err: serde_json::Error) -> Self {
        NotesError::Serialization(err.to_string())
    }
}
