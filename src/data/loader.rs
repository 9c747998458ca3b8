//! Trait-based dataset decoding.
//!
//! Decoders turn one file on disk into a [`Record`]. New formats are added
//! by implementing [`DatasetDecoder`] and registering it with the
//! [`DecoderRegistry`].
//!
//! ## Built-in Decoders
//!
//! - **JSON dataset** (`.json`): always available
//! - **DICOM** (`.dcm`): with the `dicom` cargo feature
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dcmview::data::DecoderRegistry;
//!
//! let registry = DecoderRegistry::new();
//! let record = registry.decode(Path::new("scan/slice_001.dcm"))?;
//! ```

use std::path::Path;

use crate::data::Record;

/// Error type for decoder operations.
#[derive(Debug, Clone)]
pub struct LoaderError {
    /// Human-readable error message.
    pub message: String,
    /// The decoder that produced this error (if known).
    pub loader_id: Option<&'static str>,
}

impl LoaderError {
    /// Create a new loader error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            loader_id: None,
        }
    }

    /// Attach decoder context.
    pub fn with_loader(mut self, loader_id: &'static str) -> Self {
        self.loader_id = Some(loader_id);
        self
    }
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loader) = self.loader_id {
            write!(f, "[{}] {}", loader, self.message)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for LoaderError {}

/// Trait for dataset file decoders.
pub trait DatasetDecoder: Send + Sync {
    /// Unique identifier for this decoder (e.g., "json", "dicom").
    fn id(&self) -> &'static str;

    /// Human-readable name for display.
    fn display_name(&self) -> &'static str;

    /// File extensions this decoder handles (lowercase, without dots).
    fn extensions(&self) -> &'static [&'static str];

    /// Decode one file into a record.
    fn decode(&self, path: &Path) -> Result<Record, LoaderError>;

    /// Priority when several decoders claim an extension (higher = tried first).
    fn priority(&self) -> i32 {
        0
    }
}

/// Registry of available dataset decoders.
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn DatasetDecoder>>,
}

impl DecoderRegistry {
    /// Create a registry with all built-in decoders.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(Box::new(super::loaders::JsonDatasetLoader));
        #[cfg(feature = "dicom")]
        registry.register(Box::new(super::loaders::DicomLoader));

        registry
    }

    /// Create a registry without any decoders.
    pub fn empty() -> Self {
        Self {
            decoders: Vec::new(),
        }
    }

    /// Register a new decoder.
    pub fn register(&mut self, decoder: Box<dyn DatasetDecoder>) {
        self.decoders.push(decoder);
        // Highest priority first
        self.decoders
            .sort_by(|a, b| b.priority().cmp(&a.priority()));
    }

    /// All supported file extensions, sorted. Used as the default discovery filter.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = self
            .decoders
            .iter()
            .flat_map(|d| d.extensions().iter().copied())
            .collect();
        extensions.sort();
        extensions.dedup();
        extensions
    }

    fn decoders_for_extension(&self, ext: &str) -> Vec<&dyn DatasetDecoder> {
        let ext_lower = ext.to_lowercase();
        self.decoders
            .iter()
            .filter(|d| d.extensions().iter().any(|e| *e == ext_lower))
            .map(|d| d.as_ref())
            .collect()
    }

    /// Decode a file with the decoders registered for its extension.
    ///
    /// Decoders are tried in priority order; the last error is returned if
    /// all of them fail.
    pub fn decode(&self, path: &Path) -> Result<Record, LoaderError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();

        let candidates = self.decoders_for_extension(extension);
        let mut last_error = None;

        for decoder in candidates {
            match decoder.decode(path) {
                Ok(record) => {
                    log::debug!("Decoded {:?} with {} decoder", path, decoder.id());
                    return Ok(record);
                }
                Err(e) => {
                    log::trace!("Decoder {} failed on {:?}: {}", decoder.id(), path, e);
                    last_error = Some(e.with_loader(decoder.id()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            LoaderError::new(format!("No decoder registered for {:?}", path))
        }))
    }

    /// Get all registered decoders.
    pub fn decoders(&self) -> &[Box<dyn DatasetDecoder>] {
        &self.decoders
    }
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
