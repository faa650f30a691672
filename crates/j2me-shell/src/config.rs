use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

use crate::session::DEFAULT_FRAME_RATE;
use crate::store::{DEFAULT_STATE_NAMESPACE, VaultOptions};

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: Option<PathBuf>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("environment variable '{0}' is not set")]
    MissingEnvVar(String),

    #[error("unclosed variable reference '${{' (missing '}}')")]
    UnclosedVarReference,
}

impl Config {
    /// Load the config file at `path`. A missing file yields defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        let expanded = expand_env_vars(&contents)?;
        Ok(serde_saphyr::from_str(&expanded)?)
    }

    /// Workspace directory, relative paths resolved against the config file.
    pub fn workspace_dir(&self, config_path: &Path) -> PathBuf {
        let workspace = self
            .workspace
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_WORKSPACE));
        resolve_path(config_path, workspace)
    }

    /// Directory holding the storage medium.
    pub fn storage_dir(&self, config_path: &Path) -> PathBuf {
        match &self.storage.path {
            Some(path) => resolve_path(config_path, path),
            None => self.workspace_dir(config_path).join(DEFAULT_STORAGE_DIR),
        }
    }

    pub fn vault_options(&self) -> VaultOptions {
        VaultOptions {
            state_namespace: self.storage.state_namespace.clone(),
            max_archive_bytes: (self.storage.max_archive_bytes > 0)
                .then_some(self.storage.max_archive_bytes),
        }
    }
}

/// Resolve a path relative to the config file directory.
///
/// Absolute paths are returned as-is.
pub fn resolve_path(config_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }

    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    config_dir.join(path)
}

// ============================================================================
// Default Paths
// ============================================================================

/// Default config file name.
pub const DEFAULT_CONFIG_FILE: &str = "j2me-shell.yaml";
/// Default workspace directory (relative to config file).
pub const DEFAULT_WORKSPACE: &str = ".j2me-shell";
/// Default storage directory (relative to workspace).
pub const DEFAULT_STORAGE_DIR: &str = "storage";
/// Default quota on an archive's encoded payload.
pub const DEFAULT_MAX_ARCHIVE_BYTES: usize = 16 * 1024 * 1024;

// ============================================================================
// Private Helpers (Serde Defaults)
// ============================================================================

fn default_max_archive_bytes() -> usize {
    DEFAULT_MAX_ARCHIVE_BYTES
}

fn default_state_namespace() -> String {
    DEFAULT_STATE_NAMESPACE.to_string()
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Environment Variable Expansion
// ============================================================================

/// Expand `${VAR}` and `${VAR:-default}` references.
///
/// `$$` produces a literal `$`; a `$` not followed by `{` is kept as is.
/// Defaults are taken literally (no nested references).
fn expand_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            result.push('$');
            rest = tail;
        } else if let Some(body) = after.strip_prefix('{') {
            let end = body.find('}').ok_or(ConfigError::UnclosedVarReference)?;
            result.push_str(&lookup_var(&body[..end])?);
            rest = &body[end + 1..];
        } else {
            result.push('$');
            rest = after;
        }
    }

    result.push_str(rest);
    Ok(result)
}

fn lookup_var(reference: &str) -> Result<String, ConfigError> {
    let (name, default) = match reference.split_once(":-") {
        Some((name, default)) => (name, Some(default)),
        None => (reference, None),
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_string()),
        (Err(_), None) => Err(ConfigError::MissingEnvVar(name.to_string())),
    }
}

// ============================================================================
// StorageConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    /// Storage directory. Defaults to `<workspace>/storage`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Limit on an archive's encoded payload, in bytes. Zero disables.
    #[serde(default = "default_max_archive_bytes")]
    pub max_archive_bytes: usize,
    /// Key prefix for saved session state.
    #[serde(default = "default_state_namespace")]
    pub state_namespace: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_archive_bytes: default_max_archive_bytes(),
            state_namespace: default_state_namespace(),
        }
    }
}

// ============================================================================
// SessionConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// Frames per second while running.
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Save state on stop and at the settings' auto-save interval.
    #[serde(default = "default_true")]
    pub auto_save: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            auto_save: true,
        }
    }
}
