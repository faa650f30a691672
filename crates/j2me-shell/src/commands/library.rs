//! `j2me-shell install | list | remove`: manage installed archives.

use std::path::Path;

use anyhow::{Result, bail};

use j2me_shell::runtime::HeadlessRuntime;
use j2me_shell::session::{ManualScheduler, SessionController};

use super::{format_size, open_vault};

/// Ingest `file` through the session controller, then stop it.
pub async fn install(config_path: &str, file: &Path) -> Result<()> {
    let (_, vault) = open_vault(config_path).await?;

    let mut controller = SessionController::new(
        &vault,
        Box::new(HeadlessRuntime::new()),
        ManualScheduler::new(),
    )
    .with_save_on_stop(false);

    let summary = controller.load_path(file).await?;
    controller.stop().await?;

    println!(
        "Installed {} ({})",
        summary.name,
        format_size(summary.size_bytes)
    );
    Ok(())
}

pub async fn list(config_path: &str, format: &str) -> Result<()> {
    let (_, vault) = open_vault(config_path).await?;

    let mut archives = vault.archives().list().await?;
    archives.sort_by(|a, b| a.name.cmp(&b.name));

    match format {
        "json" => println!("{}", serde_json::to_string_pretty(&archives)?),
        "text" => {
            if archives.is_empty() {
                println!("No archives installed.");
                return Ok(());
            }
            let states = vault.states().list().await?;
            let width = archives.iter().map(|a| a.name.len()).max().unwrap_or(0);
            for archive in &archives {
                let saved = if states.contains(&archive.name) {
                    "  [saved]"
                } else {
                    ""
                };
                println!(
                    "{:<width$}  {:>10}  {}{}",
                    archive.name,
                    format_size(archive.size_bytes),
                    archive.created_at.format("%Y-%m-%d %H:%M"),
                    saved,
                );
            }
        }
        other => bail!("unknown format '{other}' (expected text or json)"),
    }
    Ok(())
}

pub async fn remove(config_path: &str, name: &str) -> Result<()> {
    let (_, vault) = open_vault(config_path).await?;

    if !vault.archives().contains(name).await? {
        bail!("archive '{name}' is not installed");
    }
    vault.archives().delete(name).await?;

    println!("Removed {name}");
    Ok(())
}
