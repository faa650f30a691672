//! Storage medium trait.
//!
//! The persistence port every store writes through: a flat table of string
//! keys to string values. Stores own their keys; the medium only guarantees
//! that a single `set` is all-or-nothing.

use async_trait::async_trait;

use super::error::StorageResult;

/// Key-value persistence port shared by all stores.
#[async_trait]
pub trait StorageMedium: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key is absent.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// Must be atomic - either fully succeeds or has no effect.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> StorageResult<()>;

    /// List every key currently stored, in no particular order.
    async fn keys(&self) -> StorageResult<Vec<String>>;

    /// Remove every key.
    async fn clear(&self) -> StorageResult<()>;
}
