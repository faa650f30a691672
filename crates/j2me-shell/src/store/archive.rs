//! Asset store.
//!
//! All archives live in a single table stored under [`ARCHIVES_KEY`]:
//!
//! ```text
//! {
//!   "snake.jar": { "encodedPayload": "UEsDB...", "sizeBytes": 4096, "createdAt": 1700000000000 },
//!   ...
//! }
//! ```
//!
//! Every mutation rewrites the whole table. Writers are serialized by the
//! store's lock; two stores over the same medium are last-write-wins.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::codec::{self, ArchiveBlob};

use super::error::{StorageError, StorageResult};
use super::medium::StorageMedium;
use super::state::SessionStateStore;

/// Medium key holding the archive table.
pub const ARCHIVES_KEY: &str = "j2me_saved_games";

/// Persisted form of an installed archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveRecord {
    pub encoded_payload: String,
    pub size_bytes: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

/// Listing entry for an installed archive (no payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArchiveSummary {
    pub name: String,
    pub size_bytes: u64,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl ArchiveSummary {
    fn from_record(name: &str, record: &ArchiveRecord) -> Self {
        Self {
            name: name.to_string(),
            size_bytes: record.size_bytes,
            created_at: record.created_at,
        }
    }
}

type ArchiveTable = BTreeMap<String, ArchiveRecord>;

/// Keyed table of installed archives.
///
/// Deleting an archive also deletes its saved session state.
#[derive(Clone)]
pub struct AssetStore {
    medium: Arc<dyn StorageMedium>,
    states: SessionStateStore,
    max_payload_bytes: Option<usize>,
    write_lock: Arc<Mutex<()>>,
}

impl AssetStore {
    pub fn new(medium: Arc<dyn StorageMedium>, states: SessionStateStore) -> Self {
        Self {
            medium,
            states,
            max_payload_bytes: None,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Reject archives whose encoded payload would exceed `limit` bytes.
    pub fn with_payload_limit(mut self, limit: usize) -> Self {
        self.max_payload_bytes = Some(limit);
        self
    }

    pub(crate) fn write_lock(&self) -> &Arc<Mutex<()>> {
        &self.write_lock
    }

    async fn load_table(&self) -> StorageResult<ArchiveTable> {
        let Some(content) = self.medium.get(ARCHIVES_KEY).await? else {
            return Ok(ArchiveTable::new());
        };

        serde_json::from_str(&content)
            .map_err(|e| StorageError::deserialization(ARCHIVES_KEY, e.to_string()))
    }

    async fn store_table(&self, table: &ArchiveTable) -> StorageResult<()> {
        let content = serde_json::to_string(table)
            .map_err(|e| StorageError::serialization(e.to_string()))?;
        self.medium.set(ARCHIVES_KEY, &content).await
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Store `bytes` under `name`, replacing any existing archive.
    ///
    /// The new record's timestamp is strictly later than the one it
    /// replaces. On failure the previous record is untouched.
    pub async fn put(&self, name: &str, bytes: &[u8]) -> StorageResult<ArchiveSummary> {
        self.replace(name, bytes).await.map(|(summary, _)| summary)
    }

    /// Like [`put`](Self::put), also returning the record it replaced so a
    /// caller can [`restore`](Self::restore) it.
    pub(crate) async fn replace(
        &self,
        name: &str,
        bytes: &[u8],
    ) -> StorageResult<(ArchiveSummary, Option<ArchiveRecord>)> {
        if name.is_empty() {
            return Err(StorageError::InvalidKey(name.to_string()));
        }

        let encoded = codec::encode(bytes);
        if let Some(limit) = self.max_payload_bytes
            && encoded.len() > limit
        {
            return Err(StorageError::encoding_failed(
                name,
                format!(
                    "encoded payload is {} bytes, limit is {limit}",
                    encoded.len()
                ),
            ));
        }

        let _guard = self.write_lock.lock().await;
        let mut table = self.load_table().await?;

        let record = ArchiveRecord {
            encoded_payload: encoded,
            size_bytes: bytes.len() as u64,
            created_at: super::next_timestamp(table.get(name).map(|r| r.created_at)),
        };
        let summary = ArchiveSummary::from_record(name, &record);
        let previous = table.insert(name.to_string(), record);

        let content = serde_json::to_string(&table)
            .map_err(|e| StorageError::encoding_failed(name, e.to_string()))?;
        self.medium.set(ARCHIVES_KEY, &content).await?;

        debug!(archive = %name, size_bytes = summary.size_bytes, "stored archive");
        Ok((summary, previous))
    }

    /// Put back the record `replace` returned: reinstate `previous`, or drop
    /// `name` when there was none. Saved state is not touched.
    pub(crate) async fn restore(
        &self,
        name: &str,
        previous: Option<ArchiveRecord>,
    ) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut table = self.load_table().await?;
        match previous {
            Some(record) => {
                table.insert(name.to_string(), record);
            }
            None => {
                table.remove(name);
            }
        }
        self.store_table(&table).await?;

        debug!(archive = %name, "restored archive record");
        Ok(())
    }

    /// Remove `name` and its saved session state. Absent names are a no-op.
    ///
    /// The saved state goes first, so a failure leaves the archive installed.
    pub async fn delete(&self, name: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;

        self.states.delete(name).await?;

        let mut table = self.load_table().await?;
        if table.remove(name).is_some() {
            self.store_table(&table).await?;
            debug!(archive = %name, "deleted archive");
        }
        Ok(())
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Summaries of every installed archive, in no particular order.
    pub async fn list(&self) -> StorageResult<Vec<ArchiveSummary>> {
        let table = self.load_table().await?;
        Ok(table
            .iter()
            .map(|(name, record)| ArchiveSummary::from_record(name, record))
            .collect())
    }

    /// Decode and return the archive stored under `name`.
    pub async fn get(&self, name: &str) -> StorageResult<ArchiveBlob> {
        let table = self.load_table().await?;
        let record = table
            .get(name)
            .ok_or_else(|| StorageError::not_found("archive", name))?;

        ArchiveBlob::from_encoded(name, &record.encoded_payload)
    }

    pub async fn contains(&self, name: &str) -> StorageResult<bool> {
        Ok(self.load_table().await?.contains_key(name))
    }
}
