//! Periodic housekeeping over the shared store.
//!
//! The only job today is pruning the stored error log to recent entries.

use std::sync::Arc;
use std::time::Duration;

use chrono::Duration as TimeDelta;
use tokio::task::JoinHandle;

use crate::clock::Clock;
use crate::error::Result;
use crate::error_log::{read_error_log, write_error_log};
use crate::storage::KeyValueStore;

/// Error-log entries older than this many days are pruned.
pub const ERROR_LOG_MAX_AGE_DAYS: i64 = 7;

/// How often the periodic cleanup runs.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default retention for the stored error log.
pub fn error_log_max_age() -> TimeDelta {
    TimeDelta::days(ERROR_LOG_MAX_AGE_DAYS)
}

/// Drop error-log entries not newer than `max_age`. Returns how many were removed.
///
/// The log is only rewritten when something was removed.
pub async fn prune_error_log(
    store: &dyn KeyValueStore,
    clock: &dyn Clock,
    max_age: TimeDelta,
) -> Result<usize> {
    let entries = read_error_log(store).await?;
    let cutoff = clock.now() - max_age;
    let before = entries.len();
    let recent: Vec<_> = entries
        .into_iter()
        .filter(|entry| entry.timestamp > cutoff)
        .collect();
    let removed = before - recent.len();
    if removed > 0 {
        write_error_log(store, &recent).await?;
        tracing::info!(removed, "cleaned up old error logs");
    }
    Ok(removed)
}

/// Run [`prune_error_log`] every `interval`, first run one interval from now.
///
/// Failures are logged and the loop keeps going. Abort the handle to stop it.
pub fn spawn_periodic_cleanup(
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + interval;
        let mut ticker = tokio::time::interval_at(start, interval);
        loop {
            ticker.tick().await;
            if let Err(err) =
                prune_error_log(store.as_ref(), clock.as_ref(), error_log_max_age()).await
            {
                tracing::error!(error = %err, "failed to perform cleanup");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error_log::ErrorReport;
    use crate::storage::{MemoryStore, ERROR_LOG_KEY};
    use chrono::{DateTime, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(n * 86_400, 0).unwrap()
    }

    async fn seed(store: &MemoryStore, days: &[i64]) {
        let entries: Vec<_> = days
            .iter()
            .map(|d| ErrorReport::new(format!("day {}", d), day(*d)))
            .collect();
        write_error_log(store, &entries).await.unwrap();
    }

    #[tokio::test]
    async fn test_prune_drops_entries_older_than_a_week() {
        let store = MemoryStore::new();
        seed(&store, &[1, 2, 5, 9, 10]).await;
        let clock = ManualClock::new(day(10));

        let removed = prune_error_log(&store, &clock, error_log_max_age())
            .await
            .unwrap();

        assert_eq!(removed, 2);
        let log = read_error_log(&store).await.unwrap();
        let kept: Vec<&str> = log.iter().map(|e| e.error_message.as_str()).collect();
        assert_eq!(kept, vec!["day 5", "day 9", "day 10"]);
    }

    #[tokio::test]
    async fn test_prune_without_old_entries_does_not_write() {
        let store = MemoryStore::new();
        let clock = ManualClock::new(day(10));

        assert_eq!(
            prune_error_log(&store, &clock, error_log_max_age())
                .await
                .unwrap(),
            0
        );
        assert!(store.get_one(ERROR_LOG_KEY).await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_periodic_cleanup_runs_after_interval() {
        let store = Arc::new(MemoryStore::new());
        seed(&store, &[0, 30]).await;
        let clock = Arc::new(ManualClock::new(day(30)));

        let handle = spawn_periodic_cleanup(store.clone(), clock, Duration::from_secs(60));
        tokio::time::sleep(Duration::from_secs(61)).await;
        handle.abort();

        let log = read_error_log(store.as_ref()).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].error_message, "day 30");
    }
}
