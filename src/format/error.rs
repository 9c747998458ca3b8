//! Error types for dataset serialization.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing a record to disk.
#[derive(Error, Debug)]
pub enum WriteError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writer needs the original file but the record has none
    #[error("Record has no source file to re-encode from")]
    MissingSource,

    /// Source file could not be re-read
    #[error("Failed to re-read source {path:?}: {message}")]
    SourceUnreadable {
        /// Source path
        path: PathBuf,
        /// Underlying decoder message
        message: String,
    },

    /// Encoder rejected the record
    #[error("Failed to encode record: {message}")]
    Encode {
        /// Description of the encoding error
        message: String,
    },
}

impl WriteError {
    /// Create an encoding error with a message.
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }
}
