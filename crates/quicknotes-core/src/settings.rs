//! Install/update lifecycle record.
//!
//! On first run the settings record is created with the running version.
//! When a different version later starts against the same store, the record
//! is stamped with the new version and an update time.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::Result;
use crate::storage::{KeyValueStore, SETTINGS_KEY};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Persisted settings record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub version: String,

    /// Epoch milliseconds of first install
    pub installed_at: i64,

    /// Epoch milliseconds of the last version change
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,

    #[serde(default)]
    pub theme: Theme,
}

/// What [`ensure_settings`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    Updated { previous: String },
    Unchanged,
}

/// Read the settings record, if any.
pub async fn load_settings(store: &dyn KeyValueStore) -> Result<Option<Settings>> {
    match store.get_one(SETTINGS_KEY).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Create or refresh the settings record for `version`.
pub async fn ensure_settings(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    version: &str,
) -> Result<InstallOutcome> {
    let now = clock.now_millis();
    let Some(mut settings) = load_settings(store).await? else {
        let settings = Settings {
            version: version.to_string(),
            installed_at: now,
            updated_at: None,
            theme: Theme::default(),
        };
        store
            .set_one(SETTINGS_KEY, serde_json::to_value(&settings)?)
            .await?;
        tracing::info!(version, "installed");
        return Ok(InstallOutcome::Installed);
    };

    if settings.version == version {
        return Ok(InstallOutcome::Unchanged);
    }

    let previous = std::mem::replace(&mut settings.version, version.to_string());
    match compare_versions(&previous, version) {
        Ordering::Less => tracing::info!(from = %previous, to = version, "updated"),
        _ => tracing::warn!(from = %previous, to = version, "running an older version"),
    }
    settings.updated_at = Some(now);
    store
        .set_one(SETTINGS_KEY, serde_json::to_value(&settings)?)
        .await?;
    Ok(InstallOutcome::Updated { previous })
}

/// Compare dot-separated numeric versions. Missing or non-numeric parts count as 0.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split('.')
            .map(|part| part.trim().parse().unwrap_or(0))
            .collect()
    };
    let (left, right) = (parse(a), parse(b));
    let len = left.len().max(right.len());
    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::storage::MemoryStore;

    #[test]
    fn test_compare_versions() {
        assert_eq!(compare_versions("1.0.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("0.9.9", "1.0.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10.0", "1.9.0"), Ordering::Greater);
        assert_eq!(compare_versions("2", "1.99.99"), Ordering::Greater);
    }

    #[tokio::test]
    async fn test_first_run_installs() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_millis(42);

        let outcome = ensure_settings(&store, &clock, "0.1.0").await.unwrap();
        assert_eq!(outcome, InstallOutcome::Installed);

        let settings = load_settings(&store).await.unwrap().unwrap();
        assert_eq!(settings.version, "0.1.0");
        assert_eq!(settings.installed_at, 42);
        assert_eq!(settings.updated_at, None);
        assert_eq!(settings.theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_same_version_is_unchanged() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_millis(1);
        ensure_settings(&store, &clock, "0.1.0").await.unwrap();

        let outcome = ensure_settings(&store, &clock, "0.1.0").await.unwrap();
        assert_eq!(outcome, InstallOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_new_version_records_update() {
        let store = MemoryStore::new();
        let clock = ManualClock::at_millis(1);
        ensure_settings(&store, &clock, "0.1.0").await.unwrap();

        clock.advance(chrono::Duration::milliseconds(99));
        let outcome = ensure_settings(&store, &clock, "0.2.0").await.unwrap();
        assert_eq!(
            outcome,
            InstallOutcome::Updated {
                previous: "0.1.0".to_string()
            }
        );

        let settings = load_settings(&store).await.unwrap().unwrap();
        assert_eq!(settings.version, "0.2.0");
        assert_eq!(settings.installed_at, 1);
        assert_eq!(settings.updated_at, Some(100));
    }

    #[tokio::test]
    async fn test_reads_extension_layout() {
        let store = MemoryStore::new();
        store
            .set_one(
                SETTINGS_KEY,
                serde_json::json!({"version": "1.0.0", "installedAt": 5, "theme": "dark"}),
            )
            .await
            .unwrap();

        let settings = load_settings(&store).await.unwrap().unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.installed_at, 5);
    }
}
