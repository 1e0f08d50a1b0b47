//! BlobStore trait: the abstract interface for persistence.
//!
//! The vault is storage-agnostic. Implementations include SQLite (primary)
//! and in-memory (for tests).

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Async get/set-by-key store for opaque byte blobs.
///
/// # Design Notes
///
/// - **Last write wins**: `set` overwrites any existing value.
/// - **Atomic create**: `insert_if_absent` checks and writes in one step,
///   so two racing writers cannot both claim a key.
/// - **Idempotent delete**: deleting a missing key is not an error.
/// - **Prefix listing**: keys are namespaced (`note:<id>`), so `list_keys`
///   takes a prefix and returns matching keys in ascending order.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch the blob stored under `key`.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Store `value` under `key` only if the key is unused.
    ///
    /// Returns `false`, leaving the existing value untouched, if it was taken.
    async fn insert_if_absent(&self, key: &str, value: Vec<u8>) -> Result<bool>;

    /// Remove `key`. Returns whether it existed.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// All keys starting with `prefix`, sorted.
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>>;
}

/// JSON helpers for any [`BlobStore`].
#[async_trait]
pub trait StoreExt: BlobStore {
    /// Fetch and deserialize a JSON record.
    async fn get_json<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| StoreError::Serialization(format!("{key}: {e}"))),
            None => Ok(None),
        }
    }

    /// Serialize and store a JSON record.
    async fn set_json<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.set(key, bytes).await
    }

    /// Serialize and store a JSON record unless `key` is already taken.
    async fn insert_json_if_absent<T: Serialize + Sync>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<bool> {
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.insert_if_absent(key, bytes).await
    }
}

impl<S: BlobStore + ?Sized> StoreExt for S {}
