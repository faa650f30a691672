//! Session handle for communicating with the session actor.
//!
//! `SessionHandle` wraps the actor's command sender and a status receiver.
//! It is cheap to clone; every clone talks to the same session.

use std::path::Path;

use tokio::sync::{mpsc, oneshot, watch};

use crate::runtime::KeyEvent;
use crate::store::ArchiveSummary;

use super::actor_types::SessionCommand;
use super::controller::{ArchiveFile, SessionInfo};
use super::error::SessionError;
use super::status::SessionStatus;

/// Handle for interacting with the session actor.
#[derive(Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
    status_rx: watch::Receiver<SessionStatus>,
}

impl SessionHandle {
    pub(crate) fn new(
        tx: mpsc::Sender<SessionCommand>,
        status_rx: watch::Receiver<SessionStatus>,
    ) -> Self {
        Self { tx, status_rx }
    }

    async fn call<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<Result<T, SessionError>>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(command(reply_tx))
            .await
            .map_err(|_| SessionError::ActorShutdown)?;

        reply_rx.await.map_err(|_| SessionError::ActorShutdown)?
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    /// Ingest a file and start running it.
    pub async fn load_archive(&self, file: ArchiveFile) -> Result<ArchiveSummary, SessionError> {
        self.call(|reply| SessionCommand::LoadArchive { file, reply })
            .await
    }

    /// Ingest in-memory bytes named `file_name`.
    pub async fn load_bytes(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ArchiveSummary, SessionError> {
        self.load_archive(ArchiveFile::from_bytes(file_name, bytes))
            .await
    }

    /// Ingest the file at `path`.
    pub async fn load_path(&self, path: impl AsRef<Path>) -> Result<ArchiveSummary, SessionError> {
        self.load_archive(ArchiveFile::from_path(path.as_ref()))
            .await
    }

    /// Start an installed archive.
    pub async fn launch(&self, name: &str) -> Result<(), SessionError> {
        let name = name.to_string();
        self.call(|reply| SessionCommand::Launch { name, reply })
            .await
    }

    pub async fn pause(&self) -> Result<(), SessionError> {
        self.call(|reply| SessionCommand::Pause { reply }).await
    }

    pub async fn resume(&self) -> Result<(), SessionError> {
        self.call(|reply| SessionCommand::Resume { reply }).await
    }

    pub async fn stop(&self) -> Result<(), SessionError> {
        self.call(|reply| SessionCommand::Stop { reply }).await
    }

    // ------------------------------------------------------------------------
    // Input and persistence
    // ------------------------------------------------------------------------

    /// Send a key event. Returns whether the runtime received it.
    pub async fn send_key(&self, event: KeyEvent) -> Result<bool, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::Key {
                event,
                reply: reply_tx,
            })
            .await
            .map_err(|_| SessionError::ActorShutdown)?;

        reply_rx.await.map_err(|_| SessionError::ActorShutdown)
    }

    /// Save the running application's state now.
    pub async fn save_state(&self) -> Result<bool, SessionError> {
        self.call(|reply| SessionCommand::SaveState { reply }).await
    }

    // ------------------------------------------------------------------------
    // Read operations
    // ------------------------------------------------------------------------

    pub async fn info(&self) -> Result<SessionInfo, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(SessionCommand::GetInfo { reply: reply_tx })
            .await
            .map_err(|_| SessionError::ActorShutdown)?;

        reply_rx.await.map_err(|_| SessionError::ActorShutdown)
    }

    /// Latest published status.
    pub fn status(&self) -> SessionStatus {
        *self.status_rx.borrow()
    }

    /// Receiver notified on every status change.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status_rx.clone()
    }

    /// Wait until the session reaches `status`.
    pub async fn wait_for_status(&self, status: SessionStatus) -> Result<(), SessionError> {
        let mut rx = self.status_rx.clone();
        rx.wait_for(|current| *current == status)
            .await
            .map(|_| ())
            .map_err(|_| SessionError::ActorShutdown)
    }
}

impl std::fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHandle")
            .field("status", &*self.status_rx.borrow())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use tempfile::TempDir;
    use tokio::sync::watch;

    use super::*;
    use crate::runtime::{HeadlessRuntime, Key};
    use crate::session::actor::SessionActor;
    use crate::session::actor_types::ActorConfig;
    use crate::store::Vault;
    use crate::store::file::FileMedium;

    fn create_test_handle(
        temp_dir: &TempDir,
    ) -> (
        SessionHandle,
        Vault,
        watch::Sender<bool>,
        tokio::task::JoinHandle<()>,
    ) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let vault = Vault::new(
            Arc::new(FileMedium::new(temp_dir.path())),
            Default::default(),
        );
        let mut config = ActorConfig::new(vault.clone(), Box::new(HeadlessRuntime::new()));
        config.frame_rate = 200;
        let (handle, task_handle) = SessionActor::spawn(config, shutdown_rx);
        (handle, vault, shutdown_tx, task_handle)
    }

    fn jar_bytes() -> Vec<u8> {
        let mut bytes = b"PK\x03\x04".to_vec();
        bytes.resize(4096, 0);
        bytes
    }

    #[tokio::test]
    async fn handle_load_and_info() {
        let temp_dir = TempDir::new().unwrap();
        let (handle, _vault, shutdown_tx, _task_handle) = create_test_handle(&temp_dir);

        assert_eq!(handle.status(), SessionStatus::Idle);

        let summary = handle.load_bytes("snake.jar", jar_bytes()).await.unwrap();
        assert_eq!(summary.size_bytes, 4096);

        let info = handle.info().await.unwrap();
        assert_eq!(info.status, SessionStatus::Running);
        assert_eq!(info.current_archive.as_deref(), Some("snake.jar"));
        assert_eq!(handle.status(), SessionStatus::Running);

        shutdown_tx.send(true).unwrap();
    }

    #[tokio::test]
    async fn handle_frames_advance_while_running() {
        let temp_dir = TempDir::new().unwrap();
        let (handle, _vault, shutdown_tx, _task_handle) = create_test_handle(&temp_dir);

        handle.load_bytes("snake.jar", jar_bytes()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let frames = handle.info().await.unwrap().frames;
        assert!(frames > 0);

        handle.pause().await.unwrap();
        let paused_at = handle.info().await.unwrap().frames;
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(handle.info().await.unwrap().frames, paused_at);

        shutdown_tx.send(true).unwrap();
    }

    #[tokio::test]
    async fn handle_rejects_text_file() {
        let temp_dir = TempDir::new().unwrap();
        let (handle, vault, shutdown_tx, _task_handle) = create_test_handle(&temp_dir);

        let err = handle
            .load_bytes("readme.txt", b"hello".to_vec())
            .await
            .unwrap_err();

        assert!(matches!(err, SessionError::InvalidFileType { .. }));
        assert_eq!(handle.status(), SessionStatus::Idle);
        assert!(vault.archives().list().await.unwrap().is_empty());

        shutdown_tx.send(true).unwrap();
    }

    #[tokio::test]
    async fn handle_keys_follow_status() {
        let temp_dir = TempDir::new().unwrap();
        let (handle, _vault, shutdown_tx, _task_handle) = create_test_handle(&temp_dir);

        assert!(!handle.send_key(KeyEvent::press(Key::Center)).await.unwrap());

        handle.load_bytes("snake.jar", jar_bytes()).await.unwrap();
        assert!(handle.send_key(KeyEvent::press(Key::Center)).await.unwrap());

        handle.stop().await.unwrap();
        assert!(!handle.send_key(KeyEvent::press(Key::Center)).await.unwrap());

        shutdown_tx.send(true).unwrap();
    }

    #[tokio::test]
    async fn shutdown_saves_running_session() {
        let temp_dir = TempDir::new().unwrap();
        let (handle, vault, shutdown_tx, task_handle) = create_test_handle(&temp_dir);

        handle.load_bytes("snake.jar", jar_bytes()).await.unwrap();
        shutdown_tx.send(true).unwrap();
        task_handle.await.unwrap();

        assert!(vault.states().load("snake.jar").await.unwrap().is_some());
        assert!(matches!(
            handle.info().await,
            Err(SessionError::ActorShutdown)
        ));
    }

    #[tokio::test]
    async fn handle_is_cloneable() {
        let temp_dir = TempDir::new().unwrap();
        let (handle, _vault, shutdown_tx, _task_handle) = create_test_handle(&temp_dir);

        let handle2 = handle.clone();
        handle.load_bytes("snake.jar", jar_bytes()).await.unwrap();
        handle2.pause().await.unwrap();

        handle
            .wait_for_status(SessionStatus::Paused)
            .await
            .unwrap();
        assert_eq!(handle2.status(), SessionStatus::Paused);

        shutdown_tx.send(true).unwrap();
    }
}
