//! Session state machine.
//!
//! ```text
//!            load/launch            ok
//!  Idle ─────────────────▶ Loading ─────▶ Running ◀──resume── Paused
//!   ▲                         │             │  └───pause───────▲  │
//!   │                    fail │        stop │                     │ stop
//!   │                         ▼             ▼                     │
//!   └──── (new load) ───── Stopped ◀────────┴─────────────────────┘
//! ```
//!
//! The controller owns the runtime and the tick scheduler. Every tick
//! carries a [`TickTicket`]; leaving Running bumps the generation so any
//! ticket handed out earlier is dropped without touching the runtime.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use crate::codec::{ArchiveBlob, ArchiveKind};
use crate::runtime::{AppRuntime, KeyEvent};
use crate::store::{ArchiveSummary, AssetStore, SessionStateStore, Vault};

use super::error::{LoadFailure, SessionError};
use super::scheduler::{TickScheduler, TickTicket};
use super::status::SessionStatus;

// ============================================================================
// ArchiveFile
// ============================================================================

enum ArchiveSource {
    Bytes(Vec<u8>),
    Path(PathBuf),
}

/// A candidate file supplied by the UI layer.
///
/// The archive name is the final path component of the file name.
pub struct ArchiveFile {
    name: String,
    source: ArchiveSource,
}

impl ArchiveFile {
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            name: archive_name(file_name),
            source: ArchiveSource::Bytes(bytes),
        }
    }

    /// File read lazily once the session enters Loading.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| archive_name(&path.to_string_lossy()));
        Self {
            name,
            source: ArchiveSource::Path(path),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    async fn read(self) -> Result<Vec<u8>, LoadFailure> {
        match self.source {
            ArchiveSource::Bytes(bytes) => Ok(bytes),
            ArchiveSource::Path(path) => tokio::fs::read(&path)
                .await
                .map_err(|source| LoadFailure::Read { path, source }),
        }
    }
}

impl std::fmt::Debug for ArchiveFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("ArchiveFile");
        s.field("name", &self.name);
        match &self.source {
            ArchiveSource::Bytes(bytes) => s.field("bytes", &bytes.len()),
            ArchiveSource::Path(path) => s.field("path", path),
        };
        s.finish()
    }
}

fn archive_name(file_name: &str) -> String {
    file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .to_string()
}

// ============================================================================
// Controller
// ============================================================================

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The runtime updated and rendered frame `frame`.
    Rendered { frame: u64 },
    /// The tick was stale or arrived outside Running; nothing ran.
    Dropped,
}

/// Point-in-time view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionInfo {
    pub status: SessionStatus,
    pub current_archive: Option<String>,
    /// Frames rendered since the session entered Running.
    pub frames: u64,
}

/// Drives one session through its lifecycle.
pub struct SessionController<S> {
    archives: AssetStore,
    states: SessionStateStore,
    runtime: Box<dyn AppRuntime>,
    scheduler: S,

    status: SessionStatus,
    current_archive: Option<String>,
    generation: u64,
    frame: u64,
    save_on_stop: bool,

    status_tx: watch::Sender<SessionStatus>,
}

impl<S: TickScheduler> SessionController<S> {
    pub fn new(vault: &Vault, runtime: Box<dyn AppRuntime>, scheduler: S) -> Self {
        let (status_tx, _) = watch::channel(SessionStatus::Idle);
        Self {
            archives: vault.archives().clone(),
            states: vault.states().clone(),
            runtime,
            scheduler,
            status: SessionStatus::Idle,
            current_archive: None,
            generation: 0,
            frame: 0,
            save_on_stop: true,
            status_tx,
        }
    }

    /// Whether `stop` saves the runtime's state. Enabled by default.
    pub fn with_save_on_stop(mut self, enabled: bool) -> Self {
        self.save_on_stop = enabled;
        self
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn current_archive(&self) -> Option<&str> {
        self.current_archive.as_deref()
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            status: self.status,
            current_archive: self.current_archive.clone(),
            frames: self.frame,
        }
    }

    /// Receive every status change.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_tx.subscribe()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Ingest `file`, store it and start running it.
    ///
    /// An unsupported suffix is rejected before anything changes. Any later
    /// failure leaves the session Stopped and the Asset Store as it was.
    pub async fn load_archive(&mut self, file: ArchiveFile) -> Result<ArchiveSummary, SessionError> {
        self.ensure_accepts_load("load an archive")?;

        if ArchiveKind::from_file_name(file.name()).is_none() {
            warn!(file = %file.name(), "Rejected unsupported file type");
            return Err(SessionError::InvalidFileType {
                file_name: file.name().to_string(),
            });
        }

        let name = file.name().to_string();
        self.begin_loading(&name);

        match self.ingest(file).await {
            Ok(summary) => Ok(summary),
            Err(source) => Err(self.abort_loading(name, source)),
        }
    }

    /// Ingest the file at `path`.
    pub async fn load_path(&mut self, path: &Path) -> Result<ArchiveSummary, SessionError> {
        self.load_archive(ArchiveFile::from_path(path)).await
    }

    /// Start an archive that is already installed.
    pub async fn launch(&mut self, name: &str) -> Result<(), SessionError> {
        self.ensure_accepts_load("launch an archive")?;
        self.begin_loading(name);

        match self.open(name).await {
            Ok(()) => Ok(()),
            Err(source) => Err(self.abort_loading(name.to_string(), source)),
        }
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Running {
            return Err(self.invalid("pause"));
        }
        self.leave_running();
        self.set_status(SessionStatus::Paused);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), SessionError> {
        if self.status != SessionStatus::Paused {
            return Err(self.invalid("resume"));
        }
        self.set_status(SessionStatus::Running);
        self.schedule_next();
        Ok(())
    }

    /// Stop the session and, unless disabled, save the runtime's state.
    ///
    /// The session is Stopped before the save starts; a failed save is
    /// returned but does not undo the stop.
    pub async fn stop(&mut self) -> Result<(), SessionError> {
        if !self.status.is_active() {
            return Err(self.invalid("stop"));
        }

        let snapshot = if self.save_on_stop {
            self.runtime.snapshot_state()
        } else {
            None
        };
        let name = self.current_archive.take();

        self.leave_running();
        self.set_status(SessionStatus::Stopped);
        self.runtime.unload();

        if let (Some(name), Some(state)) = (name, snapshot) {
            self.states.save(&name, &state).await?;
            debug!(archive = %name, "Saved state on stop");
        }
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Ticks and input
    // ------------------------------------------------------------------------

    /// Deliver a tick: update then render, then request the next one.
    pub fn tick(&mut self, ticket: TickTicket) -> TickOutcome {
        if self.status != SessionStatus::Running
            || ticket.generation != self.generation
            || ticket.frame != self.frame
        {
            trace!(?ticket, status = %self.status, "Dropped tick");
            return TickOutcome::Dropped;
        }

        self.runtime.update();
        self.runtime.render();
        self.frame += 1;
        self.schedule_next();

        TickOutcome::Rendered {
            frame: ticket.frame,
        }
    }

    /// Forward a key event to the runtime. Only delivered while Running.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        if self.status != SessionStatus::Running {
            debug!(key = %event.key, status = %self.status, "Ignored key event");
            return false;
        }
        self.runtime.handle_key(event);
        true
    }

    /// Save the runtime's current state for the active archive.
    ///
    /// Returns `false` when there is nothing to save.
    pub async fn save_state(&mut self) -> Result<bool, SessionError> {
        if !self.status.is_active() {
            return Ok(false);
        }
        let Some(name) = self.current_archive.clone() else {
            return Ok(false);
        };
        let Some(state) = self.runtime.snapshot_state() else {
            return Ok(false);
        };

        self.states.save(&name, &state).await?;
        Ok(true)
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    async fn ingest(&mut self, file: ArchiveFile) -> Result<ArchiveSummary, LoadFailure> {
        let name = file.name().to_string();
        let bytes = file.read().await?;
        let (summary, previous) = self.archives.replace(&name, &bytes).await?;

        if let Err(failure) = self.start(ArchiveBlob::new(name.clone(), bytes)).await {
            if let Err(e) = self.archives.restore(&name, previous).await {
                warn!(archive = %name, error = %e, "Failed to roll back archive record");
            }
            return Err(failure);
        }
        Ok(summary)
    }

    async fn open(&mut self, name: &str) -> Result<(), LoadFailure> {
        let blob = self.archives.get(name).await?;
        self.start(blob).await
    }

    async fn start(&mut self, blob: ArchiveBlob) -> Result<(), LoadFailure> {
        self.runtime.load(&blob).await?;
        if let Some(state) = self.states.load(blob.name()).await? {
            self.runtime.restore_state(state);
            debug!(archive = %blob.name(), "Restored saved state");
        }

        self.frame = 0;
        self.set_status(SessionStatus::Running);
        self.schedule_next();
        info!(archive = %blob.name(), bytes = blob.len(), "Session running");
        Ok(())
    }

    fn begin_loading(&mut self, name: &str) {
        self.current_archive = Some(name.to_string());
        self.frame = 0;
        self.set_status(SessionStatus::Loading);
    }

    fn abort_loading(&mut self, name: String, source: LoadFailure) -> SessionError {
        self.runtime.unload();
        self.current_archive = None;
        self.leave_running();
        self.set_status(SessionStatus::Stopped);
        warn!(archive = %name, error = %source, "Failed to load archive");
        SessionError::LoadFailed { name, source }
    }

    fn leave_running(&mut self) {
        self.generation += 1;
        self.scheduler.cancel();
    }

    fn schedule_next(&mut self) {
        self.scheduler.request_tick(TickTicket {
            generation: self.generation,
            frame: self.frame,
        });
    }

    fn ensure_accepts_load(&self, event: &'static str) -> Result<(), SessionError> {
        if self.status.accepts_load() {
            Ok(())
        } else {
            Err(self.invalid(event))
        }
    }

    fn invalid(&self, event: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            status: self.status,
            event,
        }
    }

    fn set_status(&mut self, status: SessionStatus) {
        if self.status != status {
            debug!(from = %self.status, to = %status, "Session status changed");
        }
        self.status = status;
        self.status_tx.send_replace(status);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::runtime::{Key, RuntimeError};
    use crate::session::ManualScheduler;
    use crate::store::StorageError;

    #[derive(Default)]
    struct Calls {
        updates: AtomicU64,
        renders: AtomicU64,
        keys: AtomicU64,
    }

    /// Runtime that counts calls and keeps a `level` as its state.
    struct RecordingRuntime {
        calls: Arc<Calls>,
        fail_load: bool,
        level: Option<u64>,
    }

    #[async_trait]
    impl AppRuntime for RecordingRuntime {
        async fn load(&mut self, archive: &ArchiveBlob) -> Result<(), RuntimeError> {
            if self.fail_load {
                return Err(RuntimeError::UnrecognizedContainer {
                    name: archive.name().to_string(),
                });
            }
            self.level = Some(1);
            Ok(())
        }

        fn update(&mut self) {
            self.calls.updates.fetch_add(1, Ordering::SeqCst);
        }

        fn render(&mut self) {
            self.calls.renders.fetch_add(1, Ordering::SeqCst);
        }

        fn handle_key(&mut self, _event: KeyEvent) {
            self.calls.keys.fetch_add(1, Ordering::SeqCst);
        }

        fn snapshot_state(&self) -> Option<Value> {
            self.level.map(|level| json!({ "level": level }))
        }

        fn restore_state(&mut self, state: Value) {
            self.level = state.get("level").and_then(Value::as_u64);
        }

        fn unload(&mut self) {
            self.level = None;
        }
    }

    fn controller_with(
        vault: &Vault,
        fail_load: bool,
    ) -> (SessionController<ManualScheduler>, Arc<Calls>) {
        let calls = Arc::new(Calls::default());
        let runtime = RecordingRuntime {
            calls: calls.clone(),
            fail_load,
            level: None,
        };
        let controller = SessionController::new(vault, Box::new(runtime), ManualScheduler::new());
        (controller, calls)
    }

    fn snake(len: usize) -> ArchiveFile {
        ArchiveFile::from_bytes("snake.jar", vec![7u8; len])
    }

    #[tokio::test]
    async fn load_stores_archive_and_runs() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);

        let summary = controller.load_archive(snake(4096)).await.unwrap();

        assert_eq!(summary.name, "snake.jar");
        assert_eq!(summary.size_bytes, 4096);
        assert_eq!(controller.status(), SessionStatus::Running);
        assert_eq!(controller.current_archive(), Some("snake.jar"));
        assert_eq!(controller.scheduler().pending().map(|t| t.frame), Some(0));
        assert_eq!(vault.archives().get("snake.jar").await.unwrap().len(), 4096);
    }

    #[tokio::test]
    async fn unsupported_file_type_is_rejected_without_side_effects() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);

        let err = controller
            .load_archive(ArchiveFile::from_bytes("readme.txt", b"hello".to_vec()))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidFileType { .. }));
        assert_eq!(controller.status(), SessionStatus::Idle);
        assert!(vault.archives().list().await.unwrap().is_empty());
        assert!(controller.scheduler().pending().is_none());
    }

    #[tokio::test]
    async fn rejected_file_type_keeps_stopped_state() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);
        controller.load_archive(snake(8)).await.unwrap();
        controller.stop().await.unwrap();

        let err = controller
            .load_archive(ArchiveFile::from_bytes("SNAKE.JAR", vec![1]))
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidFileType { .. }));
        assert_eq!(controller.status(), SessionStatus::Stopped);
    }

    #[tokio::test]
    async fn stop_drops_pending_tick() {
        let vault = Vault::in_memory();
        let (mut controller, calls) = controller_with(&vault, false);
        controller.load_archive(snake(16)).await.unwrap();

        let pending = controller.scheduler_mut().take_pending().unwrap();
        controller.stop().await.unwrap();

        assert_eq!(controller.tick(pending), TickOutcome::Dropped);
        assert_eq!(calls.updates.load(Ordering::SeqCst), 0);
        assert_eq!(calls.renders.load(Ordering::SeqCst), 0);
        assert_eq!(controller.status(), SessionStatus::Stopped);
        assert_eq!(controller.current_archive(), None);
    }

    #[tokio::test]
    async fn ticks_are_sequential() {
        let vault = Vault::in_memory();
        let (mut controller, calls) = controller_with(&vault, false);
        controller.load_archive(snake(16)).await.unwrap();

        let first = controller.scheduler_mut().take_pending().unwrap();
        assert_eq!(controller.tick(first), TickOutcome::Rendered { frame: 0 });
        // The same ticket cannot run twice.
        assert_eq!(controller.tick(first), TickOutcome::Dropped);

        let second = controller.scheduler_mut().take_pending().unwrap();
        assert_eq!(second.frame, 1);
        assert_eq!(controller.tick(second), TickOutcome::Rendered { frame: 1 });

        assert_eq!(calls.updates.load(Ordering::SeqCst), 2);
        assert_eq!(calls.renders.load(Ordering::SeqCst), 2);
        assert_eq!(controller.info().frames, 2);
    }

    #[tokio::test]
    async fn pause_discards_tick_and_resume_reschedules() {
        let vault = Vault::in_memory();
        let (mut controller, calls) = controller_with(&vault, false);
        controller.load_archive(snake(16)).await.unwrap();

        let before_pause = controller.scheduler_mut().take_pending().unwrap();
        controller.pause().unwrap();
        assert_eq!(controller.status(), SessionStatus::Paused);
        assert!(controller.scheduler().pending().is_none());
        assert_eq!(controller.tick(before_pause), TickOutcome::Dropped);

        controller.resume().unwrap();
        assert_eq!(controller.status(), SessionStatus::Running);
        // A ticket from before the pause stays stale after resuming.
        assert_eq!(controller.tick(before_pause), TickOutcome::Dropped);

        let fresh = controller.scheduler_mut().take_pending().unwrap();
        assert_eq!(controller.tick(fresh), TickOutcome::Rendered { frame: 0 });
        assert_eq!(calls.renders.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn runtime_failure_stops_session() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, true);
        let mut status_rx = controller.subscribe();

        let err = controller.load_archive(snake(16)).await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::LoadFailed {
                source: LoadFailure::Runtime(_),
                ..
            }
        ));
        assert_eq!(controller.status(), SessionStatus::Stopped);
        assert_eq!(controller.current_archive(), None);
        assert!(controller.scheduler().pending().is_none());
        assert!(status_rx.has_changed().unwrap());
        assert_eq!(*status_rx.borrow_and_update(), SessionStatus::Stopped);
    }

    #[tokio::test]
    async fn runtime_failure_leaves_asset_store_unchanged() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, true);

        controller.load_archive(snake(4096)).await.unwrap_err();
        assert!(vault.archives().list().await.unwrap().is_empty());

        let installed = vault.archives().put("snake.jar", b"good").await.unwrap();
        controller.load_archive(snake(64)).await.unwrap_err();

        assert_eq!(vault.archives().list().await.unwrap(), vec![installed]);
        assert_eq!(vault.archives().get("snake.jar").await.unwrap().bytes(), b"good");
    }

    #[tokio::test]
    async fn storage_failure_stops_session() {
        let vault = Vault::new(
            Arc::new(crate::store::MemoryMedium::new()),
            crate::store::VaultOptions {
                max_archive_bytes: Some(4),
                ..Default::default()
            },
        );
        let (mut controller, _) = controller_with(&vault, false);

        let err = controller.load_archive(snake(64)).await.unwrap_err();

        assert!(matches!(
            err,
            SessionError::LoadFailed {
                source: LoadFailure::Storage(StorageError::EncodingFailed { .. }),
                ..
            }
        ));
        assert_eq!(controller.status(), SessionStatus::Stopped);

        // Recoverable: a new load is accepted immediately.
        controller.load_archive(ArchiveFile::from_bytes("a.jad", vec![])).await.unwrap();
        assert_eq!(controller.status(), SessionStatus::Running);
    }

    #[tokio::test]
    async fn unreadable_path_stops_session() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);

        let err = controller
            .load_path(Path::new("/nonexistent/dir/snake.jar"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SessionError::LoadFailed {
                source: LoadFailure::Read { .. },
                ..
            }
        ));
        assert_eq!(controller.status(), SessionStatus::Stopped);
        assert!(vault.archives().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_transitions_leave_state_alone() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);

        assert!(matches!(
            controller.pause(),
            Err(SessionError::InvalidTransition { .. })
        ));
        assert!(controller.resume().is_err());
        assert!(controller.stop().await.is_err());
        assert_eq!(controller.status(), SessionStatus::Idle);

        controller.load_archive(snake(8)).await.unwrap();
        let err = controller.load_archive(snake(8)).await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidTransition {
                status: SessionStatus::Running,
                ..
            }
        ));
        assert_eq!(controller.status(), SessionStatus::Running);
    }

    #[tokio::test]
    async fn stop_saves_state_and_launch_restores_it() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);
        controller.load_archive(snake(8)).await.unwrap();

        vault
            .states()
            .save("snake.jar", &json!({"level": 3}))
            .await
            .unwrap();
        controller.stop().await.unwrap();
        // Stop overwrote the externally saved level with the runtime's own.
        assert_eq!(
            vault.states().load("snake.jar").await.unwrap(),
            Some(json!({"level": 1}))
        );

        vault
            .states()
            .save("snake.jar", &json!({"level": 3}))
            .await
            .unwrap();
        controller.launch("snake.jar").await.unwrap();
        assert_eq!(controller.status(), SessionStatus::Running);
        assert!(controller.save_state().await.unwrap());
        assert_eq!(
            vault.states().load("snake.jar").await.unwrap(),
            Some(json!({"level": 3}))
        );
    }

    #[tokio::test]
    async fn stop_without_save() {
        let vault = Vault::in_memory();
        let (controller, _) = controller_with(&vault, false);
        let mut controller = controller.with_save_on_stop(false);

        controller.load_archive(snake(8)).await.unwrap();
        controller.stop().await.unwrap();

        assert!(vault.states().load("snake.jar").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn launch_missing_archive_fails() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);

        let err = controller.launch("ghost.jar").await.unwrap_err();

        match err {
            SessionError::LoadFailed {
                name,
                source: LoadFailure::Storage(e),
            } => {
                assert_eq!(name, "ghost.jar");
                assert!(e.is_not_found());
            }
            other => panic!("expected LoadFailed, got {other:?}"),
        }
        assert_eq!(controller.status(), SessionStatus::Stopped);
    }

    #[tokio::test]
    async fn keys_delivered_only_while_running() {
        let vault = Vault::in_memory();
        let (mut controller, calls) = controller_with(&vault, false);

        assert!(!controller.handle_key(KeyEvent::press(Key::Up)));

        controller.load_archive(snake(8)).await.unwrap();
        assert!(controller.handle_key(KeyEvent::press(Key::Up)));
        assert!(controller.handle_key(KeyEvent::release(Key::Up)));

        controller.pause().unwrap();
        assert!(!controller.handle_key(KeyEvent::press(Key::Center)));

        assert_eq!(calls.keys.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn save_state_when_idle_is_noop() {
        let vault = Vault::in_memory();
        let (mut controller, _) = controller_with(&vault, false);
        assert!(!controller.save_state().await.unwrap());
    }

    #[test]
    fn archive_name_strips_directories() {
        assert_eq!(archive_name("games/snake.jar"), "snake.jar");
        assert_eq!(archive_name(r"C:\games\snake.jar"), "snake.jar");
        assert_eq!(ArchiveFile::from_path("/tmp/x/tetris.jad").name(), "tetris.jad");
    }
}
