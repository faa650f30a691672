//! Application runtime seam.
//!
//! The session controller never interprets archive contents. It hands the
//! decoded archive to an [`AppRuntime`], drives `update`/`render` once per
//! tick, and forwards logical key events unmodified.

mod detect;
mod headless;
mod keys;

pub use detect::{ContainerFormat, detect_container, parse_descriptor};
pub use headless::{HeadlessRuntime, LoadedApp};
pub use keys::{Key, KeyAction, KeyEvent};

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::codec::ArchiveBlob;

/// Errors reported by a runtime while loading an archive.
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{name} is not a recognized application container")]
    UnrecognizedContainer { name: String },

    #[error("invalid application descriptor {name}: {reason}")]
    InvalidDescriptor { name: String, reason: String },

    #[error("runtime failure: {0}")]
    Other(String),
}

/// Collaborator that executes a loaded application.
#[async_trait]
pub trait AppRuntime: Send {
    /// Prepare `archive` for execution. Failure aborts the load.
    async fn load(&mut self, archive: &ArchiveBlob) -> Result<(), RuntimeError>;

    /// Advance application logic by one frame.
    fn update(&mut self);

    /// Produce one frame.
    fn render(&mut self);

    /// Deliver a logical key event.
    fn handle_key(&mut self, event: KeyEvent);

    /// Capture resumable state, if the application has any.
    fn snapshot_state(&self) -> Option<Value> {
        None
    }

    /// Restore state captured by `snapshot_state`.
    fn restore_state(&mut self, _state: Value) {}

    /// Release the loaded application.
    fn unload(&mut self) {}
}
