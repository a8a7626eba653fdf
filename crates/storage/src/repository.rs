use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage is unavailable: {0}")]
    Unavailable(String),

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Durable string-to-string store with per-key get/set.
///
/// Values are stored raw; there is no schema beyond the key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store for tests and for running without a database.
///
/// An optional byte quota over the sum of key and value lengths mimics the
/// limits browsers put on local storage.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    items: Arc<Mutex<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl InMemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            items: Arc::new(Mutex::new(HashMap::new())),
            quota: Some(quota),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if let Some(quota) = self.quota {
            let used: usize = guard
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .items
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates the stores behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub preferences: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let preferences: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
        Self { preferences }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_and_overwrites() {
        let store = InMemoryStore::new();
        assert_eq!(store.get_item("app_theme").await.unwrap(), None);

        store.set_item("app_theme", "dark").await.unwrap();
        store.set_item("app_theme", "light").await.unwrap();
        assert_eq!(
            store.get_item("app_theme").await.unwrap().as_deref(),
            Some("light")
        );

        store.remove_item("app_theme").await.unwrap();
        store.remove_item("app_theme").await.unwrap();
        assert_eq!(store.get_item("app_theme").await.unwrap(), None);
    }

    #[tokio::test]
    async fn quota_rejects_oversized_writes_and_keeps_old_value() {
        let store = InMemoryStore::with_quota(14);
        store.set_item("app_theme", "dark").await.unwrap();

        let err = store.set_item("app_theme", "midnight").await.unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded));
        assert_eq!(
            store.get_item("app_theme").await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn storage_in_memory_shares_one_store() {
        let storage = Storage::in_memory();
        let clone = storage.clone();
        storage.preferences.set_item("k", "v").await.unwrap();
        assert_eq!(
            clone.preferences.get_item("k").await.unwrap().as_deref(),
            Some("v")
        );
    }
}
