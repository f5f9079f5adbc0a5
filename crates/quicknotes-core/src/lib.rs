//! # Quick Notes Core
//!
//! Core library for Quick Notes - a small note-taking store with input
//! validation and rate limiting over an asynchronous key-value store.
//!
//! This crate provides the domain logic, storage abstractions, and data models
//! independent of the CLI interface.
//!
//! ## Architecture
//!
//! - **validation**: Sanitization and content/search-term validation
//! - **rate_limit**: Sliding-window rate limiter keyed by action
//! - **notes**: The notes store (CRUD over a single ordered collection)
//! - **search**: Case-insensitive substring filtering
//! - **storage**: Key-value store trait and implementations
//! - **error_log**: Error-log sinks and the persisted rolling error log
//! - **settings**: Install/update lifecycle record
//! - **maintenance**: Periodic pruning of stored data

pub mod clock;
pub mod error;
pub mod error_log;
pub mod fs;
pub mod maintenance;
pub mod notes;
pub mod rate_limit;
pub mod search;
pub mod settings;
pub mod storage;
pub mod validation;

pub use error::{NotesError, Result};
pub use notes::{NotesConfig, NotesStore};
pub use storage::{KeyValueStore, Note, StorageStats};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
