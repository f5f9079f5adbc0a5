use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use quicknotes_core::notes::NotesConfig;
use quicknotes_core::rate_limit::RateLimit;

#[derive(Debug, Serialize, Deserialize)]
pub struct QuickNotesConfig {
    pub store: StoreSection,
    #[serde(default)]
    pub limits: LimitsSection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoreSection {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsSection {
    pub max_notes: usize,
    pub add_note_max_actions: usize,
    pub add_note_window_seconds: u64,
    pub store_timeout_ms: u64,
}

impl Default for LimitsSection {
    fn default() -> Self {
        let defaults = NotesConfig::default();
        Self {
            max_notes: defaults.max_notes,
            add_note_max_actions: defaults.add_note_limit.max_actions,
            add_note_window_seconds: defaults.add_note_limit.window.as_secs(),
            store_timeout_ms: defaults.store_timeout.as_millis() as u64,
        }
    }
}

impl LimitsSection {
    pub fn to_notes_config(&self) -> NotesConfig {
        NotesConfig {
            max_notes: self.max_notes,
            add_note_limit: RateLimit::new(
                self.add_note_max_actions,
                Duration::from_secs(self.add_note_window_seconds),
            ),
            store_timeout: Duration::from_millis(self.store_timeout_ms),
        }
    }
}

impl QuickNotesConfig {
    pub fn new(store_path: PathBuf) -> Self {
        Self {
            store: StoreSection {
                path: store_path.to_string_lossy().to_string(),
            },
            limits: LimitsSection::default(),
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_store_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes.json"))
}

pub fn read_config(path: &Path) -> anyhow::Result<QuickNotesConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &QuickNotesConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

/// Expand a leading `~` or `~/` against `$HOME`.
pub fn expand_tilde(path: &str) -> anyhow::Result<PathBuf> {
    if path == "~" {
        return home_dir();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }
    Ok(PathBuf::from(path))
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("quicknotes"));
        }
    }
    Ok(home_dir()?.join(".config").join("quicknotes"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("quicknotes"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("quicknotes"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
