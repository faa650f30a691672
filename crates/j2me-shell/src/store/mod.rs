//! Storage abstraction layer.
//!
//! Every store persists through a [`StorageMedium`], a flat string table:
//!
//! - [`AssetStore`] - installed archives, one table under a single key
//! - [`SessionStateStore`] - saved runtime state, one key per archive
//! - [`Vault`] - owns the medium and all stores; usage and clear-all
//!
//! The file backend lives in the [`file`] module.

mod archive;
mod error;
pub mod file;
mod medium;
mod memory;
mod state;
mod vault;

pub use archive::{ARCHIVES_KEY, ArchiveRecord, ArchiveSummary, AssetStore};
pub use error::{StorageError, StorageResult};
pub use medium::StorageMedium;
pub use memory::MemoryMedium;
pub use state::{DEFAULT_STATE_NAMESPACE, SessionStateStore, StateRecord};
pub use vault::{StorageUsage, Vault, VaultOptions};

use chrono::{DateTime, Utc};

/// Timestamp for a record replacing one saved at `previous`.
///
/// Millisecond precision (the persisted resolution), and strictly later
/// than `previous` even if the clock has not moved.
pub(crate) fn next_timestamp(previous: Option<DateTime<Utc>>) -> DateTime<Utc> {
    let now = Utc::now().timestamp_millis();
    let millis = match previous {
        Some(prev) => now.max(prev.timestamp_millis() + 1),
        None => now,
    };
    DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
}
