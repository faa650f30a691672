//! Storage facade.
//!
//! A [`Vault`] wires every store onto one medium and provides the
//! operations that span them: usage statistics and clear-all.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::settings::SettingsStore;
use crate::theme::ThemeStore;

use super::archive::AssetStore;
use super::error::StorageResult;
use super::file::FileMedium;
use super::medium::StorageMedium;
use super::memory::MemoryMedium;
use super::state::{DEFAULT_STATE_NAMESPACE, SessionStateStore};

/// Options applied when assembling a [`Vault`].
#[derive(Debug, Clone)]
pub struct VaultOptions {
    pub state_namespace: String,
    /// Per-archive limit on the encoded payload, in bytes.
    pub max_archive_bytes: Option<usize>,
}

impl Default for VaultOptions {
    fn default() -> Self {
        Self {
            state_namespace: DEFAULT_STATE_NAMESPACE.to_string(),
            max_archive_bytes: None,
        }
    }
}

/// Totals reported to settings screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageUsage {
    /// Sum of stored value lengths over every key.
    pub total_bytes: u64,
    pub archives: usize,
    pub saved_states: usize,
}

impl StorageUsage {
    /// Total usage in megabytes, two decimals.
    pub fn megabytes(&self) -> String {
        format!("{:.2} MB", self.total_bytes as f64 / (1024.0 * 1024.0))
    }
}

/// All persistent state of the shell, on one medium.
#[derive(Clone)]
pub struct Vault {
    medium: Arc<dyn StorageMedium>,
    archives: AssetStore,
    states: SessionStateStore,
    settings: SettingsStore,
    themes: ThemeStore,
}

impl Vault {
    pub fn new(medium: Arc<dyn StorageMedium>, options: VaultOptions) -> Self {
        let states = SessionStateStore::new(medium.clone(), options.state_namespace);
        let mut archives = AssetStore::new(medium.clone(), states.clone());
        if let Some(limit) = options.max_archive_bytes {
            archives = archives.with_payload_limit(limit);
        }

        Self {
            settings: SettingsStore::new(medium.clone()),
            themes: ThemeStore::new(medium.clone()),
            medium,
            archives,
            states,
        }
    }

    /// Vault backed by files under `root`.
    pub fn open(root: impl AsRef<Path>, options: VaultOptions) -> Self {
        Self::new(Arc::new(FileMedium::new(root.as_ref())), options)
    }

    /// Vault that lives only in memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryMedium::new()), VaultOptions::default())
    }

    pub fn archives(&self) -> &AssetStore {
        &self.archives
    }

    pub fn states(&self) -> &SessionStateStore {
        &self.states
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn themes(&self) -> &ThemeStore {
        &self.themes
    }

    /// Totals across every table on the medium.
    pub async fn usage(&self) -> StorageResult<StorageUsage> {
        let mut total_bytes = 0u64;
        for key in self.medium.keys().await? {
            if let Some(value) = self.medium.get(&key).await? {
                total_bytes += value.len() as u64;
            }
        }

        Ok(StorageUsage {
            total_bytes,
            archives: self.archives.list().await?.len(),
            saved_states: self.states.list().await?.len(),
        })
    }

    /// Remove every archive and saved state, then restore default settings.
    ///
    /// Holds both store locks for the duration, so callers never observe one
    /// table cleared and the other not.
    pub async fn clear_all(&self) -> StorageResult<()> {
        let _archives = self.archives.write_lock().lock().await;
        let _states = self.states.write_lock().lock().await;

        self.medium.clear().await?;
        self.settings.reset().await?;

        info!("cleared all stored archives and state");
        Ok(())
    }
}
