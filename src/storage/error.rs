//! Storage error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing stored values
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Encoding a value to JSON or binary format failed
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Decoding a value from JSON or binary format failed
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    /// Stored envelope was written by an incompatible version
    #[error("Unsupported storage version {found}, supported: {supported}")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// Key cannot be used to address a stored value
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
