//! Error reporting sinks.
//!
//! The notes store forwards every failed operation to an [`ErrorSink`].
//! Reporting is best-effort: a sink never returns an error, and a failure to
//! record one is only traced.
//!
//! [`StoredErrorLog`] keeps a rolling log of the last [`MAX_ERROR_LOG_ENTRIES`]
//! reports in the key-value store under
//! [`ERROR_LOG_KEY`](crate::storage::ERROR_LOG_KEY).

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::storage::{KeyValueStore, ERROR_LOG_KEY};

/// Maximum number of entries kept in the stored error log.
pub const MAX_ERROR_LOG_ENTRIES: usize = 50;

/// One failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    #[serde(rename = "error")]
    pub error_message: String,

    #[serde(rename = "stack", default, skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note_id: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl ErrorReport {
    pub fn new(error_message: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            error_message: error_message.into(),
            stack_trace: None,
            action: None,
            note_id: None,
            timestamp,
        }
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_note_id(mut self, note_id: impl Into<String>) -> Self {
        self.note_id = Some(note_id.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }
}

/// Destination for error reports.
#[async_trait]
pub trait ErrorSink: Send + Sync {
    async fn report(&self, report: ErrorReport);
}

/// Sink that only emits a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

#[async_trait]
impl ErrorSink for TracingSink {
    async fn report(&self, report: ErrorReport) {
        trace_report(&report);
    }
}

fn trace_report(report: &ErrorReport) {
    tracing::error!(
        action = report.action.as_deref().unwrap_or("-"),
        note_id = report.note_id.as_deref().unwrap_or("-"),
        timestamp = %report.timestamp,
        "{}",
        report.error_message
    );
}

/// Sink that appends reports to the stored rolling log.
pub struct StoredErrorLog {
    store: Arc<dyn KeyValueStore>,
    append_lock: Mutex<()>,
}

impl StoredErrorLog {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            append_lock: Mutex::new(()),
        }
    }

    async fn append(&self, report: &ErrorReport) -> Result<()> {
        let _guard = self.append_lock.lock().await;
        let mut entries = read_error_log(self.store.as_ref()).await?;
        entries.push(report.clone());
        if entries.len() > MAX_ERROR_LOG_ENTRIES {
            let excess = entries.len() - MAX_ERROR_LOG_ENTRIES;
            entries.drain(..excess);
        }
        write_error_log(self.store.as_ref(), &entries).await
    }
}

#[async_trait]
impl ErrorSink for StoredErrorLog {
    async fn report(&self, report: ErrorReport) {
        trace_report(&report);
        if let Err(err) = self.append(&report).await {
            tracing::warn!(error = %err, "failed to persist error report");
        }
    }
}

/// Read the stored error log, oldest first.
///
/// Entries that do not parse are skipped.
pub async fn read_error_log(store: &dyn KeyValueStore) -> Result<Vec<ErrorReport>> {
    let value = match store.get_one(ERROR_LOG_KEY).await? {
        Some(value) => value,
        None => return Ok(Vec::new()),
    };
    let Value::Array(items) = value else {
        tracing::warn!("stored error log is not an array; ignoring it");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Replace the stored error log.
pub async fn write_error_log(store: &dyn KeyValueStore, entries: &[ErrorReport]) -> Result<()> {
    store
        .set_one(ERROR_LOG_KEY, serde_json::to_value(entries)?)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_report_serializes_like_extension_log() {
        let report = ErrorReport::new("boom", ts(0))
            .with_action("saveNote")
            .with_note_id("n1");
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["error"], "boom");
        assert_eq!(value["action"], "saveNote");
        assert_eq!(value["noteId"], "n1");
        assert!(value.get("stack").is_none());
        assert_eq!(value["timestamp"], "1970-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn test_stored_log_appends_in_order() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sink = StoredErrorLog::new(store.clone());

        sink.report(ErrorReport::new("first", ts(1))).await;
        sink.report(ErrorReport::new("second", ts(2)).with_stack_trace("at x"))
            .await;

        let log = read_error_log(store.as_ref()).await.unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0].error_message, "first");
        assert_eq!(log[1].stack_trace.as_deref(), Some("at x"));
    }

    #[tokio::test]
    async fn test_stored_log_keeps_last_fifty() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sink = StoredErrorLog::new(store.clone());

        for i in 0..(MAX_ERROR_LOG_ENTRIES as i64 + 5) {
            sink.report(ErrorReport::new(format!("e{}", i), ts(i))).await;
        }

        let log = read_error_log(store.as_ref()).await.unwrap();
        assert_eq!(log.len(), MAX_ERROR_LOG_ENTRIES);
        assert_eq!(log[0].error_message, "e5");
        assert_eq!(log[MAX_ERROR_LOG_ENTRIES - 1].error_message, "e54");
    }

    #[tokio::test]
    async fn test_read_skips_malformed_entries() {
        let store = MemoryStore::new();
        store
            .set_one(
                ERROR_LOG_KEY,
                serde_json::json!([
                    {"error": "ok", "timestamp": "2024-01-01T00:00:00Z"},
                    {"nonsense": 1}
                ]),
            )
            .await
            .unwrap();

        let log = read_error_log(&store).await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].error_message, "ok");
    }
}
