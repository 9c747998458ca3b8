//! JSON dataset writer.
//!
//! Produces files readable by
//! [`JsonDatasetLoader`](crate::data::loaders::JsonDatasetLoader).

use std::path::Path;

use crate::data::Record;
use crate::format::error::WriteError;
use crate::format::traits::DatasetWriter;

/// Writes records as pretty-printed JSON.
pub struct JsonDatasetWriter;

impl JsonDatasetWriter {
    /// Serialize a record to JSON bytes.
    pub fn to_bytes(record: &Record) -> Result<Vec<u8>, WriteError> {
        Ok(serde_json::to_vec_pretty(record)?)
    }
}

impl DatasetWriter for JsonDatasetWriter {
    fn id(&self) -> &'static str {
        "json"
    }

    fn display_name(&self) -> &'static str {
        "JSON Dataset (.json)"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn write(&self, record: &Record, path: &Path) -> Result<(), WriteError> {
        let bytes = Self::to_bytes(record)?;
        std::fs::write(path, &bytes)?;
        log::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}
