//! Persistent application log
//!
//! A short, user-visible history of what the application did (links
//! received, entries saved or removed). Kept newest first and capped at
//! [`MAX_LOG_ENTRIES`]. Diagnostics go through `tracing`, not here.

use crate::models::{LogEntry, LogLevel};
use crate::storage::{load_json, save_json, KeyValueStore, StorageResult};

/// Storage key holding the serialized entries
pub const APP_LOGS_KEY: &str = "@app_logs";

/// Oldest entries beyond this are dropped on write
pub const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Clone)]
pub struct AppLog<S> {
    backend: S,
}

impl<S: KeyValueStore> AppLog<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Append an entry
    pub async fn record(
        &self,
        message: impl Into<String>,
        level: LogLevel,
    ) -> StorageResult<LogEntry> {
        let entry = LogEntry::new(message, level);

        let mut entries = self.entries().await;
        entries.insert(0, entry.clone());
        entries.truncate(MAX_LOG_ENTRIES);
        save_json(&self.backend, APP_LOGS_KEY, &entries).await?;

        Ok(entry)
    }

    pub async fn info(&self, message: impl Into<String>) -> StorageResult<LogEntry> {
        self.record(message, LogLevel::Info).await
    }

    pub async fn warning(&self, message: impl Into<String>) -> StorageResult<LogEntry> {
        self.record(message, LogLevel::Warning).await
    }

    pub async fn error(&self, message: impl Into<String>) -> StorageResult<LogEntry> {
        self.record(message, LogLevel::Error).await
    }

    /// All entries, newest first; unreadable data reads as empty
    pub async fn entries(&self) -> Vec<LogEntry> {
        load_json(&self.backend, APP_LOGS_KEY)
            .await
            .unwrap_or_default()
    }

    pub async fn clear(&self) -> StorageResult<()> {
        self.backend.remove(APP_LOGS_KEY).await
    }
}
