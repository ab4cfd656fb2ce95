//! Storage layer
//!
//! Every store in the crate sits on a durable string key/value primitive.
//! Values are whole JSON documents; there is no partial update.
//!
//! ## Backends
//!
//! - **FileStore**: one file per key, written atomically
//! - **MemoryStore**: in-process map, used by tests and ephemeral sessions

pub mod error;
pub mod file;
pub mod memory;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;

/// Durable storage addressed by string key
///
/// `get` on a missing key yields `Ok(None)`. `set` replaces the value as a
/// unit: on failure the previous value stays readable.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Read and decode the JSON value under `key`
///
/// Missing, unreadable, or undecodable values all come back as `None`;
/// the latter two are logged.
pub(crate) async fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore,
{
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value, using default");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored value is not valid JSON, using default");
            None
        }
    }
}

/// Encode `value` as JSON and store it under `key`
pub(crate) async fn save_json<T, S>(store: &S, key: &str, value: &T) -> StorageResult<()>
where
    T: serde::Serialize + ?Sized,
    S: KeyValueStore,
{
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw).await
}
