//! Session actor.
//!
//! A dedicated tokio task owns the [`SessionController`] and its
//! [`FramePacer`]. Commands, frame ticks and auto-save all run on this one
//! task, so a tick can never interleave with a transition.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use super::actor_types::{ActorConfig, CHANNEL_CAPACITY, SessionCommand};
use super::controller::{SessionController, TickOutcome};
use super::handle::SessionHandle;
use super::scheduler::{FramePacer, skipping_interval};
use super::status::SessionStatus;

/// Task that serializes every session operation.
pub struct SessionActor {
    controller: SessionController<FramePacer>,
    auto_save: Option<Duration>,

    // Communication
    command_rx: mpsc::Receiver<SessionCommand>,
    shutdown_rx: watch::Receiver<bool>,
}

impl SessionActor {
    /// Spawn the actor.
    ///
    /// The actor exits when `shutdown_rx` turns true or every handle is
    /// dropped, stopping (and saving) an active session first.
    pub fn spawn(
        config: ActorConfig,
        shutdown_rx: watch::Receiver<bool>,
    ) -> (SessionHandle, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);

        let controller = SessionController::new(
            &config.vault,
            config.runtime,
            FramePacer::new(config.frame_rate),
        )
        .with_save_on_stop(config.save_on_stop);
        let status_rx = controller.subscribe();

        let actor = Self {
            controller,
            auto_save: config.auto_save.filter(|period| !period.is_zero()),
            command_rx: rx,
            shutdown_rx,
        };

        let handle = tokio::spawn(actor.run());
        (SessionHandle::new(tx, status_rx), handle)
    }

    async fn run(mut self) {
        debug!(
            frame_period_us = self.controller.scheduler().period().as_micros() as u64,
            "Session actor started"
        );

        let auto_save_period = self.auto_save.unwrap_or(Duration::from_secs(60));
        let mut auto_save_timer = skipping_interval(auto_save_period);

        loop {
            tokio::select! {
                biased;

                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        debug!("Session actor received shutdown signal");
                        self.drain_commands().await;
                        self.shutdown().await;
                        break;
                    }
                }

                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(command) => self.handle_command(command).await,
                        None => {
                            debug!("All handles dropped, shutting down");
                            self.shutdown().await;
                            break;
                        }
                    }
                }

                ticket = self.controller.scheduler_mut().next_tick() => {
                    if let TickOutcome::Rendered { frame } = self.controller.tick(ticket) {
                        tracing::trace!(frame, "Rendered frame");
                    }
                }

                _ = auto_save_timer.tick(), if self.auto_save.is_some() => {
                    self.auto_save().await;
                }
            }
        }

        debug!("Session actor stopped");
    }

    /// Process commands already queued before shutdown.
    async fn drain_commands(&mut self) {
        while let Ok(cmd) = self.command_rx.try_recv() {
            self.handle_command(cmd).await;
        }
    }

    async fn handle_command(&mut self, cmd: SessionCommand) {
        match cmd {
            SessionCommand::LoadArchive { file, reply } => {
                let result = self.controller.load_archive(file).await;
                let _ = reply.send(result);
            }
            SessionCommand::Launch { name, reply } => {
                let result = self.controller.launch(&name).await;
                let _ = reply.send(result);
            }
            SessionCommand::Pause { reply } => {
                let _ = reply.send(self.controller.pause());
            }
            SessionCommand::Resume { reply } => {
                let _ = reply.send(self.controller.resume());
            }
            SessionCommand::Stop { reply } => {
                let result = self.controller.stop().await;
                let _ = reply.send(result);
            }
            SessionCommand::Key { event, reply } => {
                let _ = reply.send(self.controller.handle_key(event));
            }
            SessionCommand::SaveState { reply } => {
                let result = self.controller.save_state().await;
                let _ = reply.send(result);
            }
            SessionCommand::GetInfo { reply } => {
                let _ = reply.send(self.controller.info());
            }
        }
    }

    async fn auto_save(&mut self) {
        if self.controller.status() != SessionStatus::Running {
            return;
        }
        match self.controller.save_state().await {
            Ok(true) => debug!("Auto-saved session state"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "Auto-save failed"),
        }
    }

    async fn shutdown(&mut self) {
        if !self.controller.status().is_active() {
            return;
        }
        if let Err(e) = self.controller.stop().await {
            warn!(error = %e, "Failed to stop session during shutdown");
        }
    }
}
