//! `j2me-shell run`: launch an installed archive headlessly.

use std::time::Duration;

use anyhow::{Result, bail};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use j2me_shell::runtime::HeadlessRuntime;
use j2me_shell::session::{FramePacer, SessionController, TickOutcome, skipping_interval};

use super::open_vault;

/// Launch `name` and drive frames until `frames` have rendered or Ctrl-C.
///
/// While running, state is saved at the settings' auto-save interval and
/// again on stop, unless auto-save is disabled in the config.
pub async fn run(config_path: &str, name: &str, frames: Option<u64>) -> Result<()> {
    let (config, vault) = open_vault(config_path).await?;

    if !vault.archives().contains(name).await? {
        bail!("archive '{name}' is not installed");
    }

    let settings = vault.settings().load().await?;
    let auto_save = settings
        .auto_save_period()
        .filter(|_| config.session.auto_save);

    let mut controller = SessionController::new(
        &vault,
        Box::new(HeadlessRuntime::new()),
        FramePacer::new(config.session.frame_rate),
    )
    .with_save_on_stop(config.session.auto_save);

    controller.launch(name).await?;
    let started = Instant::now();

    let period = auto_save.unwrap_or(Duration::from_secs(60));
    let mut auto_save_timer = skipping_interval(period);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        if frames.is_some_and(|limit| controller.info().frames >= limit) {
            break;
        }
        tokio::select! {
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
            ticket = controller.scheduler_mut().next_tick() => {
                if controller.tick(ticket) == TickOutcome::Dropped {
                    break;
                }
            }
            _ = auto_save_timer.tick(), if auto_save.is_some() => {
                match controller.save_state().await {
                    Ok(saved) => debug!(saved, "Auto-save"),
                    Err(e) => warn!(error = %e, "Auto-save failed"),
                }
            }
        }
    }

    let rendered = controller.info().frames;
    controller.stop().await?;

    println!(
        "Ran {name} for {rendered} frames in {:.2}s",
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
