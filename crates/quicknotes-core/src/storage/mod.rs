//! Storage abstractions and implementations.

pub mod file;
pub mod memory;
pub mod traits;
pub mod types;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyQuery, KeyValueStore};
pub use types::{Note, StorageStats};

/// Key holding the note collection.
pub const NOTES_KEY: &str = "quickNotes";

/// Key holding the rolling error log.
pub const ERROR_LOG_KEY: &str = "quickNotes_errorLog";

/// Key holding install/update settings.
pub const SETTINGS_KEY: &str = "quickNotes_settings";
