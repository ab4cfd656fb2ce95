//! Saved scheme URLs
//!
//! The list lives under a single key as one JSON array, newest first.
//! Every operation reads the whole list, changes it in memory and writes
//! the whole list back before returning.
//!
//! ## Usage
//!
//! ```ignore
//! let store = SavedUrlStore::new(FileStore::from_config(&config));
//!
//! let item = store.insert("Profile", "myapp://user/42").await?;
//! let all = store.list_all().await;   // [item, ...]
//! store.remove_by_id(&item.id).await?;
//! ```

use tracing::info;

use crate::models::SavedUrl;
use crate::storage::{load_json, save_json, KeyValueStore, StorageResult};

/// Storage key holding the serialized list
pub const SAVED_URLS_KEY: &str = "@saved_urls";

/// Persistent, ordered list of saved scheme URLs
///
/// Single writer: there is no compare-and-swap. Two mutations issued
/// without awaiting each other race, and the last full-list write wins.
/// A failed read counts as an empty list, so an insert right after a
/// transient read error replaces the stored list with the one new entry.
#[derive(Debug, Clone)]
pub struct SavedUrlStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SavedUrlStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Get the underlying key/value backend
    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// All saved URLs, most recently inserted first
    ///
    /// Nothing stored, unreadable storage and corrupt data all read as an
    /// empty list.
    pub async fn list_all(&self) -> Vec<SavedUrl> {
        load_json(&self.backend, SAVED_URLS_KEY)
            .await
            .unwrap_or_default()
    }

    /// Get a saved URL by ID
    pub async fn get(&self, id: &str) -> Option<SavedUrl> {
        self.list_all().await.into_iter().find(|item| item.id == id)
    }

    /// Save a new entry at the front of the list
    ///
    /// The caller validates `name` and `url`. The list is durable when this
    /// returns; on error the stored list is unchanged.
    pub async fn insert(
        &self,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> StorageResult<SavedUrl> {
        let item = SavedUrl::new(name, url);

        let mut list = self.list_all().await;
        list.insert(0, item.clone());
        save_json(&self.backend, SAVED_URLS_KEY, &list).await?;

        info!(id = %item.id, name = %item.name, "Saved scheme URL");
        Ok(item)
    }

    /// Delete the entry with `id`
    ///
    /// An unknown ID is not an error; the list is written back unchanged.
    pub async fn remove_by_id(&self, id: &str) -> StorageResult<()> {
        let mut list = self.list_all().await;
        let before = list.len();
        list.retain(|item| item.id != id);
        save_json(&self.backend, SAVED_URLS_KEY, &list).await?;

        if list.len() < before {
            info!(id, "Removed scheme URL");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::TempDir;

    fn memory_store() -> SavedUrlStore<MemoryStore> {
        SavedUrlStore::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn test_fresh_store_is_empty() {
        let store = memory_store();
        assert!(store.list_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_then_list() {
        let store = memory_store();

        let item = store.insert("Profile", "myapp://user/42").await.unwrap();
        let all = store.list_all().await;

        assert_eq!(all.len(), 1);
        assert_eq!(all[0], item);
        assert_eq!(all[0].name, "Profile");
        assert_eq!(all[0].url, "myapp://user/42");
    }

    #[tokio::test]
    async fn test_newest_first() {
        let store = memory_store();

        let a = store.insert("A", "myapp://a").await.unwrap();
        let b = store.insert("B", "myapp://b").await.unwrap();

        assert_eq!(store.list_all().await, vec![b, a]);
    }

    #[tokio::test]
    async fn test_remove_inserted() {
        let store = memory_store();
        store.insert("A", "myapp://a").await.unwrap();
        let b = store.insert("B", "myapp://b").await.unwrap();

        let before = store.list_all().await.len();
        store.remove_by_id(&b.id).await.unwrap();
        let after = store.list_all().await;

        assert_eq!(after.len(), before - 1);
        assert!(after.iter().all(|item| item.id != b.id));
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let store = memory_store();
        store.insert("A", "myapp://a").await.unwrap();
        store.insert("B", "myapp://b").await.unwrap();
        let before = store.list_all().await;

        store.remove_by_id("not-an-id").await.unwrap();

        assert_eq!(store.list_all().await, before);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let store = memory_store();
        let a = store.insert("A", "myapp://a").await.unwrap();

        assert_eq!(store.get(&a.id).await, Some(a));
        assert!(store.get("missing").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_insert_leaves_list_unchanged() {
        let store = memory_store();
        store.insert("A", "myapp://a").await.unwrap();
        let before = store.list_all().await;

        store.backend().set_reject_writes(true);
        assert!(store.insert("B", "myapp://b").await.is_err());
        store.backend().set_reject_writes(false);

        assert_eq!(store.list_all().await, before);
    }

    #[tokio::test]
    async fn test_failed_remove_propagates() {
        let store = memory_store();
        let a = store.insert("A", "myapp://a").await.unwrap();

        store.backend().set_reject_writes(true);
        assert!(store.remove_by_id(&a.id).await.is_err());
        store.backend().set_reject_writes(false);

        assert_eq!(store.list_all().await, vec![a]);
    }

    #[tokio::test]
    async fn test_corrupt_data_reads_as_empty() {
        let backend = MemoryStore::new();
        backend.set(SAVED_URLS_KEY, "{not json").await.unwrap();
        let store = SavedUrlStore::new(backend);

        assert!(store.list_all().await.is_empty());

        // The next insert replaces the unreadable blob
        let item = store.insert("A", "myapp://a").await.unwrap();
        assert_eq!(store.list_all().await, vec![item]);
    }

    #[tokio::test]
    async fn test_reads_existing_layout() {
        let backend = MemoryStore::new();
        backend
            .set(
                SAVED_URLS_KEY,
                r#"[{"id":"1","name":"One","url":"myapp://1"},{"id":"2","name":"Two","url":"myapp://2"}]"#,
            )
            .await
            .unwrap();
        let store = SavedUrlStore::new(backend);

        let all = store.list_all().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "1");
        assert_eq!(all[1].name, "Two");
    }

    #[tokio::test]
    async fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let item = {
            let store = SavedUrlStore::new(FileStore::new(temp_dir.path()));
            store.insert("Profile", "myapp://user/42").await.unwrap()
        };

        let reopened = SavedUrlStore::new(FileStore::new(temp_dir.path()));
        assert_eq!(reopened.list_all().await, vec![item]);
    }
}
