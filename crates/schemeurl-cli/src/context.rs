//! Stores shared by the command handlers

use schemeurl_core::{AppLog, Config, FileStore, SavedUrlStore, SettingsStore};

/// Everything a command needs, opened once per run
pub struct AppContext {
    pub config: Config,
    pub saved: SavedUrlStore<FileStore>,
    pub settings: SettingsStore<FileStore>,
    pub log: AppLog<FileStore>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let backend = FileStore::from_config(&config);
        Self {
            saved: SavedUrlStore::new(backend.clone()),
            settings: SettingsStore::new(backend.clone()),
            log: AppLog::new(backend),
            config,
        }
    }

    /// Append to the application log; failures are reported, never fatal
    pub async fn note(&self, message: impl Into<String>) {
        if let Err(e) = self.log.info(message).await {
            tracing::warn!(error = %e, "Failed to append application log");
        }
    }

    pub async fn note_error(&self, message: impl Into<String>) {
        if let Err(e) = self.log.error(message).await {
            tracing::warn!(error = %e, "Failed to append application log");
        }
    }
}
