//! The notes store.
//!
//! [`NotesStore`] owns the `quickNotes` key: one JSON array of [`Note`]s,
//! newest first. Every mutation reads the whole collection, changes it, and
//! writes it back. Mutations on one `NotesStore` are serialized through an
//! internal lock, so concurrent callers sharing an instance do not overwrite
//! each other. Writers in other processes are not coordinated.
//!
//! Failed operations are forwarded to the configured [`ErrorSink`] before
//! the error is returned. Reads fail soft: `get_all` returns an empty list
//! when the store cannot be read.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::clock::{Clock, SystemClock};
use crate::error::{NotesError, Result};
use crate::error_log::{ErrorReport, ErrorSink, TracingSink};
use crate::rate_limit::{RateLimit, RateLimiter};
use crate::search::filter_by_search;
use crate::storage::{KeyQuery, KeyValueStore, Note, StorageStats, NOTES_KEY};
use crate::validation::{validate_content, validate_search_term};

/// Maximum number of notes in the collection.
pub const MAX_NOTES: usize = 1000;

/// Rate-limiter key for note creation.
pub const ADD_NOTE_ACTION: &str = "addNote";

/// Tunables for a [`NotesStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotesConfig {
    /// Collection size cap
    pub max_notes: usize,

    /// Budget for `save`
    pub add_note_limit: RateLimit,

    /// Deadline for each call into the key-value store
    pub store_timeout: Duration,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            max_notes: MAX_NOTES,
            add_note_limit: RateLimit::new(20, Duration::from_secs(60)),
            store_timeout: Duration::from_secs(5),
        }
    }
}

/// Builder for [`NotesStore`].
pub struct NotesStoreBuilder {
    store: Arc<dyn KeyValueStore>,
    clock: Option<Arc<dyn Clock>>,
    limiter: Option<Arc<RateLimiter>>,
    sink: Option<Arc<dyn ErrorSink>>,
    config: NotesConfig,
}

impl NotesStoreBuilder {
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Use a shared limiter. Without one, a fresh limiter on the store's clock is created.
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(mut self, config: NotesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> NotesStore {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let limiter = self
            .limiter
            .unwrap_or_else(|| Arc::new(RateLimiter::new(clock.clone())));
        NotesStore {
            store: self.store,
            clock,
            limiter,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            config: self.config,
            write_lock: Mutex::new(()),
        }
    }
}

/// CRUD over the note collection.
pub struct NotesStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    limiter: Arc<RateLimiter>,
    sink: Arc<dyn ErrorSink>,
    config: NotesConfig,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for NotesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl NotesStore {
    /// Store with the system clock, a private rate limiter, and a tracing-only error sink.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::builder(store).build()
    }

    pub fn builder(store: Arc<dyn KeyValueStore>) -> NotesStoreBuilder {
        NotesStoreBuilder {
            store,
            clock: None,
            limiter: None,
            sink: None,
            config: NotesConfig::default(),
        }
    }

    pub fn config(&self) -> &NotesConfig {
        &self.config
    }

    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// All notes, newest first. Returns an empty list if the store cannot be read.
    pub async fn get_all(&self) -> Vec<Note> {
        match self.load_notes().await {
            Ok(notes) => notes,
            Err(err) => {
                self.report(&err, "getAllNotes", None).await;
                Vec::new()
            }
        }
    }

    /// Like [`get_all`](Self::get_all), but storage failures are returned
    /// instead of being read as an empty collection.
    pub async fn try_get_all(&self) -> Result<Vec<Note>> {
        let result = self.load_notes().await;
        if let Err(err) = &result {
            self.report(err, "getAllNotes", None).await;
        }
        result
    }

    /// Look up one note by id. Fails soft like `get_all`.
    pub async fn get(&self, id: &str) -> Option<Note> {
        self.get_all().await.into_iter().find(|note| note.id == id)
    }

    /// Notes whose content contains `term`, ignoring case.
    ///
    /// The term is sanitized the same way stored content is, so markup
    /// characters match their escaped form.
    pub async fn search(&self, term: &str) -> Vec<Note> {
        let term = validate_search_term(term);
        filter_by_search(&self.get_all().await, &term)
    }

    /// Create a note from raw user input.
    ///
    /// # Errors
    ///
    /// - `RateLimited` if more than the `addNote` budget was used in the window
    /// - `InvalidContent` if the content is empty or too long
    /// - `StorageFull` if the collection is at `max_notes`
    /// - `StorageUnavailable` / `Serialization` if the store fails
    pub async fn save(&self, raw_content: &str) -> Result<Note> {
        let result = self.try_save(raw_content).await;
        if let Err(err) = &result {
            self.report(err, "saveNote", None).await;
        }
        result
    }

    async fn try_save(&self, raw_content: &str) -> Result<Note> {
        if !self
            .limiter
            .check(ADD_NOTE_ACTION, self.config.add_note_limit)
        {
            return Err(NotesError::RateLimited {
                action: ADD_NOTE_ACTION.to_string(),
            });
        }
        let content = validate_content(raw_content)?;

        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_notes().await?;
        if notes.len() >= self.config.max_notes {
            return Err(NotesError::StorageFull {
                max: self.config.max_notes,
            });
        }

        let now = self.clock.now_millis();
        let note = Note {
            id: Uuid::new_v4().to_string(),
            content,
            created_at: now,
            updated_at: now,
        };
        notes.insert(0, note.clone());
        self.persist(&notes).await?;

        tracing::debug!(note_id = %note.id, count = notes.len(), "saved note");
        Ok(note)
    }

    /// Delete a note. Returns `false`, without writing, if no note has `id`.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.try_delete(id).await;
        if let Err(err) = &result {
            self.report(err, "deleteNote", Some(id)).await;
        }
        result
    }

    async fn try_delete(&self, id: &str) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_notes().await?;
        let before = notes.len();
        notes.retain(|note| note.id != id);
        if notes.len() == before {
            return Ok(false);
        }
        self.persist(&notes).await?;

        tracing::debug!(note_id = id, count = notes.len(), "deleted note");
        Ok(true)
    }

    /// Replace a note's content. Returns `None` if no note has `id`.
    ///
    /// New content goes through the same validation and sanitizing as `save`.
    pub async fn update(&self, id: &str, new_content: &str) -> Result<Option<Note>> {
        let result = self.try_update(id, new_content).await;
        if let Err(err) = &result {
            self.report(err, "updateNote", Some(id)).await;
        }
        result
    }

    async fn try_update(&self, id: &str, new_content: &str) -> Result<Option<Note>> {
        let content = validate_content(new_content)?;

        let _guard = self.write_lock.lock().await;
        let mut notes = self.load_notes().await?;
        let Some(note) = notes.iter_mut().find(|note| note.id == id) else {
            return Ok(None);
        };
        note.content = content;
        note.updated_at = self.clock.now_millis().max(note.created_at);
        let updated = note.clone();
        self.persist(&notes).await?;

        tracing::debug!(note_id = id, "updated note");
        Ok(Some(updated))
    }

    /// Remove every note. Irreversible.
    pub async fn clear_all(&self) -> Result<()> {
        let result = self.try_clear_all().await;
        if let Err(err) = &result {
            self.report(err, "clearAllNotes", None).await;
        }
        result
    }

    async fn try_clear_all(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.with_timeout(self.store.remove(&[NOTES_KEY])).await?;
        tracing::info!("cleared all notes");
        Ok(())
    }

    /// Note count and serialized size of the whole store partition.
    ///
    /// Diagnostic only; returns zeros if the store cannot be read.
    pub async fn get_stats(&self) -> StorageStats {
        match self.try_get_stats().await {
            Ok(stats) => stats,
            Err(err) => {
                self.report(&err, "getStorageStats", None).await;
                StorageStats::default()
            }
        }
    }

    async fn try_get_stats(&self) -> Result<StorageStats> {
        let notes_count = self.load_notes().await?.len();
        let everything = self.with_timeout(self.store.get(KeyQuery::All)).await?;
        let storage_bytes_used = serde_json::to_string(&everything)?.len();
        Ok(StorageStats {
            notes_count,
            storage_bytes_used,
        })
    }

    async fn load_notes(&self) -> Result<Vec<Note>> {
        match self.with_timeout(self.store.get_one(NOTES_KEY)).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    async fn persist(&self, notes: &[Note]) -> Result<()> {
        let value = serde_json::to_value(notes)?;
        self.with_timeout(self.store.set_one(NOTES_KEY, value))
            .await
    }

    async fn with_timeout<T>(&self, call: impl Future<Output = Result<T>>) -> Result<T> {
        let limit = self.config.store_timeout;
        tokio::time::timeout(limit, call).await.map_err(|_| {
            NotesError::StorageUnavailable(format!(
                "store did not respond within {} ms",
                limit.as_millis()
            ))
        })?
    }

    async fn report(&self, err: &NotesError, action: &str, note_id: Option<&str>) {
        let mut report = ErrorReport::new(err.to_string(), self.clock.now()).with_action(action);
        if let Some(id) = note_id {
            report = report.with_note_id(id);
        }
        self.sink.report(report).await;
    }
}
