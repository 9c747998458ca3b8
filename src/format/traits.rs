//! Trait definitions for dataset serializers.

use std::path::Path;

use crate::data::Record;
use crate::format::error::WriteError;

/// Trait for writing a [`Record`] back to a file.
///
/// Each output format implements this trait. The anonymizer only depends on
/// this trait, so any format can receive de-identified records.
pub trait DatasetWriter: Send + Sync {
    /// Unique identifier for this writer (e.g., "json", "dicom").
    fn id(&self) -> &'static str;

    /// Human-readable name for display.
    fn display_name(&self) -> &'static str;

    /// Canonical file extension (without dot) of files produced by this writer.
    fn extension(&self) -> &'static str;

    /// Write a record to `path`, replacing any existing file.
    fn write(&self, record: &Record, path: &Path) -> Result<(), WriteError>;
}
