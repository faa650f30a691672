//! Session error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::runtime::RuntimeError;
use crate::store::StorageError;

use super::status::SessionStatus;

/// Errors returned by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The file's suffix is not an accepted archive type.
    #[error("unsupported file type: {file_name} (expected a .jar or .jad file)")]
    InvalidFileType { file_name: String },

    /// The Loading transition failed; the session is now stopped.
    #[error("failed to load {name}: {source}")]
    LoadFailed {
        name: String,
        #[source]
        source: LoadFailure,
    },

    /// The event is not valid in the current state.
    #[error("cannot {event} while session is {status}")]
    InvalidTransition {
        status: SessionStatus,
        event: &'static str,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The session actor has shut down.
    #[error("session actor has shut down")]
    ActorShutdown,
}

/// Underlying cause of a [`SessionError::LoadFailed`].
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}
