//! File-based storage medium.
//!
//! Directory structure:
//! ```text
//! {root}/
//!   {base64url(key)}.entry          # One value per key
//!   {base64url(sha256(key))}.hashed # Keys too long for a file name
//!   {name}.tmp                      # In-flight write, renamed into place
//! ```
//!
//! Keys are encoded with unpadded URL-safe base64 so archive names with
//! separators or non-ASCII characters still map to a single flat file.
//! When the encoded key would exceed [`MAX_ENCODED_KEY_LEN`], the file is
//! named after the key's digest and holds a `{key, value}` document instead
//! of the bare value.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::fs;

use crate::store::error::{StorageError, StorageResult};
use crate::store::medium::StorageMedium;

const ENTRY_EXTENSION: &str = "entry";
const HASHED_EXTENSION: &str = "hashed";

/// Longest encoded key stored under its own name. Leaves room for the
/// extension and `.tmp` suffix within a 255-byte file name.
const MAX_ENCODED_KEY_LEN: usize = 200;

/// Where a key lives on disk.
#[derive(Debug)]
enum EntryPath {
    /// File content is the bare value.
    Plain(PathBuf),
    /// File content is a [`HashedEntry`].
    Hashed(PathBuf),
}

impl EntryPath {
    fn path(&self) -> &Path {
        match self {
            Self::Plain(path) | Self::Hashed(path) => path,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct HashedEntry {
    key: String,
    value: String,
}

/// File-based implementation of `StorageMedium`.
#[derive(Debug, Clone)]
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    /// Create a new file medium.
    ///
    /// The root directory will be created when the first key is written.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the file path for a key.
    fn entry_path(&self, key: &str) -> StorageResult<EntryPath> {
        if key.is_empty() {
            return Err(StorageError::InvalidKey(key.to_string()));
        }

        let encoded = URL_SAFE_NO_PAD.encode(key);
        if encoded.len() <= MAX_ENCODED_KEY_LEN {
            return Ok(EntryPath::Plain(
                self.root.join(format!("{encoded}.{ENTRY_EXTENSION}")),
            ));
        }

        let digest = URL_SAFE_NO_PAD.encode(Sha256::digest(key.as_bytes()));
        Ok(EntryPath::Hashed(
            self.root.join(format!("{digest}.{HASHED_EXTENSION}")),
        ))
    }

    /// Recover the key from a plain entry file name.
    fn key_from_file_name(file_name: &str) -> Option<String> {
        let stem = file_name.strip_suffix(".entry")?;
        let bytes = URL_SAFE_NO_PAD.decode(stem).ok()?;
        String::from_utf8(bytes).ok()
    }

    async fn ensure_root(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::file_io(&self.root, e))
    }

    async fn read_file(path: &Path) -> StorageResult<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::file_io(path, e)),
        }
    }

    /// Read a digest-named entry. Missing files are `None`.
    async fn read_hashed(path: &Path) -> StorageResult<Option<HashedEntry>> {
        let Some(content) = Self::read_file(path).await? else {
            return Ok(None);
        };
        serde_json::from_str(&content).map(Some).map_err(|e| {
            StorageError::deserialization(path.display().to_string(), e.to_string())
        })
    }

    async fn entry_files(&self) -> StorageResult<Vec<(String, PathBuf)>> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(e) => e,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::file_io(&self.root, e)),
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::file_io(&self.root, e))?
        {
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };

            if let Some(key) = Self::key_from_file_name(file_name) {
                files.push((key, path));
            } else if file_name.ends_with(&format!(".{HASHED_EXTENSION}")) {
                match Self::read_hashed(&path).await {
                    Ok(Some(hashed)) => files.push((hashed.key, path)),
                    Ok(None) => {}
                    Err(e) => tracing::warn!(error = %e, "skipping unreadable storage entry"),
                }
            }
        }

        Ok(files)
    }
}

#[async_trait]
impl StorageMedium for FileMedium {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match self.entry_path(key)? {
            EntryPath::Plain(path) => Self::read_file(&path).await,
            EntryPath::Hashed(path) => Ok(Self::read_hashed(&path)
                .await?
                .filter(|entry| entry.key == key)
                .map(|entry| entry.value)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let entry = self.entry_path(key)?;
        self.ensure_root().await?;

        let content = match &entry {
            EntryPath::Plain(_) => value.to_string(),
            EntryPath::Hashed(_) => serde_json::to_string(&HashedEntry {
                key: key.to_string(),
                value: value.to_string(),
            })
            .map_err(|e| StorageError::serialization(e.to_string()))?,
        };

        let path = entry.path();
        let mut temp_name = path.as_os_str().to_owned();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, content)
            .await
            .map_err(|e| StorageError::file_io(&temp_path, e))?;

        fs::rename(&temp_path, path)
            .await
            .map_err(|e| StorageError::file_io(path, e))?;

        tracing::trace!(key, bytes = value.len(), "wrote storage entry");
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        let entry = self.entry_path(key)?;
        let path = entry.path();

        match fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::file_io(path, e)),
        }
    }

    async fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self
            .entry_files()
            .await?
            .into_iter()
            .map(|(key, _)| key)
            .collect())
    }

    async fn clear(&self) -> StorageResult<()> {
        for (_, path) in self.entry_files().await? {
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(StorageError::file_io(&path, e)),
            }
        }
        Ok(())
    }
}
