//! Unified error types for storage operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    // ========================================================================
    // Medium errors
    // ========================================================================
    /// I/O error while touching a file-backed medium.
    #[error("I/O error at {path}: {source}")]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored value could not be parsed back into its record type.
    #[error("deserialization error at key {key}: {message}")]
    Deserialization { key: String, message: String },

    /// The key cannot be represented by the medium.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    // ========================================================================
    // Record errors
    // ========================================================================
    /// Error serializing data.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An archive could not be turned into a persistable record.
    ///
    /// The previously stored record (if any) is left untouched.
    #[error("failed to encode archive {name}: {message}")]
    EncodingFailed { name: String, message: String },

    /// A persisted payload is not valid codec output.
    #[error("corrupt archive encoding: {0}")]
    CorruptEncoding(String),

    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
}

impl StorageError {
    /// Create a file I/O error with path context.
    pub fn file_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// Create a deserialization error for a medium key.
    pub fn deserialization(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Deserialization {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an encoding failure for the named archive.
    pub fn encoding_failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::EncodingFailed {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a corrupt encoding error.
    pub fn corrupt_encoding(message: impl Into<String>) -> Self {
        Self::CorruptEncoding(message.into())
    }

    /// Create a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Whether this error only reports a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Convenience type alias for storage results.
pub type StorageResult<T> = Result<T, StorageError>;
