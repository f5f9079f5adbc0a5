//! Application context for the Quick Notes CLI.
//!
//! Bundles CLI arguments with the lazily-loaded config file and opens the
//! notes store the commands operate on.

use std::path::PathBuf;
use std::sync::Arc;

use once_cell::unsync::OnceCell;

use quicknotes_core::clock::{Clock, SystemClock};
use quicknotes_core::error_log::StoredErrorLog;
use quicknotes_core::notes::{NotesConfig, NotesStore};
use quicknotes_core::storage::{FileStore, KeyValueStore};

use crate::cli::Cli;
use crate::config::{
    default_config_path, default_store_path, expand_tilde, read_config, QuickNotesConfig,
};

/// An opened store: the raw key-value partition plus the notes store over it.
pub struct Session {
    pub kv: Arc<dyn KeyValueStore>,
    pub notes: NotesStore,
    pub clock: Arc<dyn Clock>,
    pub path: PathBuf,
}

pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("QUICKNOTES_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<QuickNotesConfig>>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// The config file, if one exists. Loaded once.
    pub fn config(&self) -> anyhow::Result<Option<&QuickNotesConfig>> {
        let config = self.config.get_or_try_init(|| {
            let path = resolve_config_path()?;
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no config file; using defaults");
                return Ok::<_, anyhow::Error>(None);
            }
            read_config(&path).map(Some)
        })?;
        Ok(config.as_ref())
    }

    /// Store path: `--store`/`QUICKNOTES_STORE`, then config, then the XDG default.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = self.cli.store.as_deref() {
            return expand_tilde(path);
        }
        match self.config()? {
            Some(config) => expand_tilde(&config.store.path),
            None => default_store_path(),
        }
    }

    pub fn notes_config(&self) -> anyhow::Result<NotesConfig> {
        Ok(self
            .config()?
            .map(|config| config.limits.to_notes_config())
            .unwrap_or_default())
    }

    /// Open the store with failures recorded in its error log.
    pub fn open(&self) -> anyhow::Result<Session> {
        let path = self.store_path()?;
        let kv: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&path));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let notes = NotesStore::builder(kv.clone())
            .clock(clock.clone())
            .error_sink(Arc::new(StoredErrorLog::new(kv.clone())))
            .config(self.notes_config()?)
            .build();
        tracing::debug!(path = %path.display(), "opened store");
        Ok(Session {
            kv,
            notes,
            clock,
            path,
        })
    }
}
