//! CLI command implementations.

use std::path::Path;

use anyhow::{Context, Result};

use j2me_shell::config::Config;
use j2me_shell::store::Vault;

pub mod library;
pub mod run;
pub mod settings;
pub mod storage;

/// Load the config at `config_path` and open the vault it points to.
pub async fn open_vault(config_path: &str) -> Result<(Config, Vault)> {
    let config = Config::load(config_path)
        .await
        .with_context(|| format!("loading {config_path}"))?;
    let storage_dir = config.storage_dir(Path::new(config_path));
    tracing::debug!(path = %storage_dir.display(), "Opening storage");

    let vault = Vault::open(&storage_dir, config.vault_options());
    Ok((config, vault))
}

/// Human-readable byte count.
pub fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    let bytes_f = bytes as f64;
    if bytes_f < KB {
        format!("{bytes} B")
    } else if bytes_f < KB * KB {
        format!("{:.1} KB", bytes_f / KB)
    } else {
        format!("{:.2} MB", bytes_f / (KB * KB))
    }
}
