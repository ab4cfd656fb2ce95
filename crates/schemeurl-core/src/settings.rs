//! User preferences
//!
//! Theme choice and agreement acceptance, each stored as a JSON boolean
//! under its own key. Reads never fail: missing or unreadable values fall
//! back to defaults.

use serde::{Deserialize, Serialize};

use crate::storage::{load_json, save_json, KeyValueStore, StorageResult};

pub const DARK_MODE_KEY: &str = "dark_mode_preference";
pub const EULA_ACCEPTED_KEY: &str = "eula_accepted";

/// Color theme handed to whatever renders the UI
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Pick the theme from the stored preference, or the system setting
    /// when the user never chose one
    pub fn resolve(dark_mode: Option<bool>, system_dark: bool) -> Self {
        if dark_mode.unwrap_or(system_dark) {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// Snapshot of all stored preferences
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct Preferences {
    /// `None` follows the system setting
    pub dark_mode: Option<bool>,
    pub eula_accepted: bool,
}

#[derive(Debug, Clone)]
pub struct SettingsStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub async fn preferences(&self) -> Preferences {
        Preferences {
            dark_mode: self.dark_mode().await,
            eula_accepted: self.eula_accepted().await,
        }
    }

    pub async fn dark_mode(&self) -> Option<bool> {
        load_json(&self.backend, DARK_MODE_KEY).await
    }

    pub async fn set_dark_mode(&self, enabled: bool) -> StorageResult<()> {
        save_json(&self.backend, DARK_MODE_KEY, &enabled).await
    }

    /// Forget the explicit choice and follow the system again
    pub async fn clear_dark_mode(&self) -> StorageResult<()> {
        self.backend.remove(DARK_MODE_KEY).await
    }

    /// Flip the current theme and store the result as an explicit choice
    pub async fn toggle_theme(&self, system_dark: bool) -> StorageResult<Theme> {
        let next = Theme::resolve(self.dark_mode().await, system_dark).toggled();
        self.set_dark_mode(next.is_dark()).await?;
        Ok(next)
    }

    pub async fn eula_accepted(&self) -> bool {
        load_json(&self.backend, EULA_ACCEPTED_KEY)
            .await
            .unwrap_or(false)
    }

    pub async fn set_eula_accepted(&self, accepted: bool) -> StorageResult<()> {
        save_json(&self.backend, EULA_ACCEPTED_KEY, &accepted).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_theme_resolve() {
        assert_eq!(Theme::resolve(None, false), Theme::Light);
        assert_eq!(Theme::resolve(None, true), Theme::Dark);
        assert_eq!(Theme::resolve(Some(true), false), Theme::Dark);
        assert_eq!(Theme::resolve(Some(false), true), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
    }

    #[tokio::test]
    async fn test_defaults_when_unset() {
        let settings = SettingsStore::new(MemoryStore::new());
        assert_eq!(settings.preferences().await, Preferences::default());
    }

    #[tokio::test]
    async fn test_dark_mode_round_trip() {
        let settings = SettingsStore::new(MemoryStore::new());

        settings.set_dark_mode(true).await.unwrap();
        assert_eq!(settings.dark_mode().await, Some(true));

        settings.clear_dark_mode().await.unwrap();
        assert_eq!(settings.dark_mode().await, None);
    }

    #[tokio::test]
    async fn test_toggle_theme_from_system() {
        let settings = SettingsStore::new(MemoryStore::new());

        assert_eq!(settings.toggle_theme(true).await.unwrap(), Theme::Light);
        assert_eq!(settings.dark_mode().await, Some(false));

        assert_eq!(settings.toggle_theme(true).await.unwrap(), Theme::Dark);
        assert_eq!(settings.dark_mode().await, Some(true));
    }

    #[tokio::test]
    async fn test_eula_accepted() {
        let settings = SettingsStore::new(MemoryStore::new());
        assert!(!settings.eula_accepted().await);

        settings.set_eula_accepted(true).await.unwrap();
        assert!(settings.eula_accepted().await);
    }

    #[tokio::test]
    async fn test_garbage_value_falls_back() {
        let backend = MemoryStore::new();
        backend.set(EULA_ACCEPTED_KEY, "yes please").await.unwrap();
        backend.set(DARK_MODE_KEY, "1").await.unwrap();

        let settings = SettingsStore::new(backend);
        assert!(!settings.eula_accepted().await);
        // "1" is valid JSON but not a bool
        assert_eq!(settings.dark_mode().await, None);
    }
}
