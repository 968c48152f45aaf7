use std::sync::Arc;

use quiz_core::model::{FinalResult, Question};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{KeyValueRepository, StorageError, StoreKey};

/// Typed accessors for the pending question batch and the latest final result.
///
/// Reads never clear an entry; a value stays readable until the next write to the same key.
/// Entries that exist but cannot be decoded read as absent.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<dyn KeyValueRepository>,
}

impl SessionStore {
    #[must_use]
    pub fn new(entries: Arc<dyn KeyValueRepository>) -> Self {
        Self { entries }
    }

    /// Replace the pending batch.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the batch cannot be encoded or written.
    pub async fn put_pending_batch(&self, batch: &[Question]) -> Result<(), StorageError> {
        self.put(StoreKey::PendingBatch, batch).await
    }

    /// Read the pending batch, or `None` if none was stored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn take_pending_batch(&self) -> Result<Option<Vec<Question>>, StorageError> {
        self.get(StoreKey::PendingBatch).await
    }

    /// Replace the stored final result.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be encoded or written.
    pub async fn put_final_result(&self, result: &FinalResult) -> Result<(), StorageError> {
        self.put(StoreKey::FinalResult, result).await
    }

    /// Read the latest final result, or `None` if no quiz was completed yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub async fn take_final_result(&self) -> Result<Option<FinalResult>, StorageError> {
        self.get(StoreKey::FinalResult).await
    }

    async fn put<T: Serialize + ?Sized>(&self, key: StoreKey, value: &T) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.entries.put_entry(key, json).await?;
        tracing::debug!(%key, "session entry written");
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, key: StoreKey) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.entries.get_entry(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(%key, error = %err, "discarding undecodable session entry");
                Ok(None)
            }
        }
    }
}
