//! Writer registry for discovering and accessing dataset serializers.

use std::collections::HashMap;

use crate::format::formats::JsonDatasetWriter;
use crate::format::traits::DatasetWriter;

/// Registry of available dataset writers.
///
/// All built-in writers are registered automatically on creation.
pub struct WriterRegistry {
    writers: HashMap<&'static str, Box<dyn DatasetWriter>>,
}

impl WriterRegistry {
    /// Create a new registry with all built-in writers registered.
    pub fn new() -> Self {
        let mut registry = Self {
            writers: HashMap::new(),
        };

        registry.register(Box::new(JsonDatasetWriter));
        #[cfg(feature = "dicom")]
        registry.register(Box::new(crate::format::formats::DicomWriter));

        registry
    }

    /// Register a writer implementation.
    pub fn register(&mut self, writer: Box<dyn DatasetWriter>) {
        self.writers.insert(writer.id(), writer);
    }

    /// Get a writer by its ID.
    pub fn get(&self, id: &str) -> Option<&dyn DatasetWriter> {
        self.writers.get(id).map(|w| w.as_ref())
    }

    /// Find the writer producing files with the given extension.
    pub fn by_extension(&self, ext: &str) -> Option<&dyn DatasetWriter> {
        let ext_lower = ext.to_lowercase();
        self.writers
            .values()
            .find(|w| w.extension() == ext_lower)
            .map(|w| w.as_ref())
    }

    /// Get all writer IDs, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.writers.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
