//! `j2me-shell storage`: usage report and clear-all.

use anyhow::Result;

use super::open_vault;

pub async fn run(config_path: &str, clear: bool) -> Result<()> {
    let (_, vault) = open_vault(config_path).await?;

    if clear {
        vault.clear_all().await?;
        println!("Cleared all archives and saved state; settings restored to defaults.");
    }

    let usage = vault.usage().await?;
    println!("Storage used:  {}", usage.megabytes());
    println!("Archives:      {}", usage.archives);
    println!("Saved states:  {}", usage.saved_states);
    Ok(())
}
