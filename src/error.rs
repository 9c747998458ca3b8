//! Error types for viewer operations.

use std::path::PathBuf;
use thiserror::Error;

use crate::data::LoaderError;
use crate::format::WriteError;

/// Errors surfaced to the presentation layer.
///
/// All of these are recoverable: the caller reports them and keeps its
/// previous state.
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Folder held no matching files, or nothing could be decoded
    #[error("No dataset files found in {folder:?}")]
    EmptyCollection {
        /// Folder that was scanned
        folder: PathBuf,
    },

    /// A file failed to decode; the whole load is aborted
    #[error("Failed to decode {path:?}: {source}")]
    DecodeFailure {
        /// File that failed
        path: PathBuf,
        /// Decoder error
        source: LoaderError,
    },

    /// Anonymization prefix is empty or whitespace
    #[error("Anonymization prefix cannot be empty")]
    InvalidPrefix,

    /// Writing an anonymized record failed; earlier files remain on disk
    #[error("Failed to write anonymized record {index} to {path:?}: {source}")]
    AnonymizationWriteFailed {
        /// 1-based position of the record in the collection
        index: usize,
        /// Output path that failed
        path: PathBuf,
        /// Writer error
        source: WriteError,
    },

    /// A record selected for display has no usable pixel buffer
    #[error("Record {index} has no displayable pixel data")]
    MissingPixelData {
        /// 0-based position of the record in the collection
        index: usize,
    },

    /// Playback requested for a volume without frames
    #[error("Volume has no frames to play")]
    EmptyVolume,

    /// Record index past the end of the collection
    #[error("Record {index} out of range (collection has {len} records)")]
    RecordOutOfRange {
        /// Requested 0-based index
        index: usize,
        /// Number of records in the collection
        len: usize,
    },

    /// Command requires a loaded collection
    #[error("No collection loaded")]
    NoCollection,

    /// I/O error while scanning or preparing folders
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Preview image encoding failed
    #[error("Image export error: {0}")]
    Export(#[from] image::ImageError),
}
