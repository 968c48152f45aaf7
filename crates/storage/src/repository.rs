use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::session_store::SessionStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// The two named entries of the session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Question batch fetched for the next (or current) quiz run.
    PendingBatch,
    /// Result of the most recently completed quiz run.
    FinalResult,
}

impl StoreKey {
    /// Stable name the entry is stored under.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::PendingBatch => "quizData",
            StoreKey::FinalResult => "quizResult",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable string key-value area holding the session entries.
///
/// Every key is independent: writing one entry never touches another.
#[async_trait]
pub trait KeyValueRepository: Send + Sync {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn get_entry(&self, key: StoreKey) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn put_entry(&self, key: StoreKey, value: String) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<StoreKey, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl KeyValueRepository for InMemoryRepository {
    async fn get_entry(&self, key: StoreKey) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&key).cloned())
    }

    async fn put_entry(&self, key: StoreKey, value: String) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key, value);
        Ok(())
    }
}

/// Aggregates the key-value backend behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub entries: Arc<dyn KeyValueRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let entries: Arc<dyn KeyValueRepository> = Arc::new(InMemoryRepository::new());
        Self { entries }
    }

    /// Typed access to the pending batch and final result entries.
    #[must_use]
    pub fn session_store(&self) -> SessionStore {
        SessionStore::new(Arc::clone(&self.entries))
    }
}
