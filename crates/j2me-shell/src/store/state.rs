//! Session state store.
//!
//! Holds the last saved runtime state for each archive under
//! `{namespace}_{archive name}`. The state itself is opaque JSON owned by
//! the runtime.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::error::{StorageError, StorageResult};
use super::medium::StorageMedium;

/// Default key namespace for saved session state.
pub const DEFAULT_STATE_NAMESPACE: &str = "j2me_game_data";

/// Persisted form of a saved state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub state: Value,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub saved_at: DateTime<Utc>,
}

/// Last-write-wins table of saved session state, keyed by archive name.
#[derive(Clone)]
pub struct SessionStateStore {
    medium: Arc<dyn StorageMedium>,
    namespace: String,
    write_lock: Arc<Mutex<()>>,
}

impl SessionStateStore {
    pub fn new(medium: Arc<dyn StorageMedium>, namespace: impl Into<String>) -> Self {
        Self {
            medium,
            namespace: namespace.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Medium key holding the state for `name`.
    pub fn key_for(&self, name: &str) -> String {
        format!("{}_{}", self.namespace, name)
    }

    pub(crate) fn write_lock(&self) -> &Arc<Mutex<()>> {
        &self.write_lock
    }

    /// Save `state` for `name`, replacing whatever was there.
    pub async fn save(&self, name: &str, state: &Value) -> StorageResult<StateRecord> {
        let _guard = self.write_lock.lock().await;
        self.save_unlocked(name, state).await
    }

    async fn save_unlocked(&self, name: &str, state: &Value) -> StorageResult<StateRecord> {
        let key = self.key_for(name);
        let previous = self.load_record(name).await.ok().flatten();
        let record = StateRecord {
            state: state.clone(),
            saved_at: super::next_timestamp(previous.map(|r| r.saved_at)),
        };

        let content = serde_json::to_string(&record)
            .map_err(|e| StorageError::serialization(e.to_string()))?;
        self.medium.set(&key, &content).await?;

        debug!(archive = %name, bytes = content.len(), "saved session state");
        Ok(record)
    }

    /// Load the most recent state for `name`.
    ///
    /// Returns `Ok(None)` if nothing has been saved.
    pub async fn load(&self, name: &str) -> StorageResult<Option<Value>> {
        Ok(self.load_record(name).await?.map(|r| r.state))
    }

    /// Load the full record (state plus timestamp) for `name`.
    pub async fn load_record(&self, name: &str) -> StorageResult<Option<StateRecord>> {
        let key = self.key_for(name);
        let Some(content) = self.medium.get(&key).await? else {
            return Ok(None);
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StorageError::deserialization(&key, e.to_string()))
    }

    /// Delete the saved state for `name`. Absent state is not an error.
    pub async fn delete(&self, name: &str) -> StorageResult<()> {
        let _guard = self.write_lock.lock().await;
        self.delete_unlocked(name).await
    }

    async fn delete_unlocked(&self, name: &str) -> StorageResult<()> {
        self.medium.remove(&self.key_for(name)).await?;
        debug!(archive = %name, "deleted session state");
        Ok(())
    }

    /// Names of archives that currently have saved state.
    pub async fn list(&self) -> StorageResult<Vec<String>> {
        let prefix = format!("{}_", self.namespace);
        Ok(self
            .medium
            .keys()
            .await?
            .into_iter()
            .filter_map(|key| key.strip_prefix(&prefix).map(str::to_string))
            .collect())
    }
}
