//! Dataset records and decoders.
//!
//! This module provides:
//! - `Record`: one decoded file (ordered metadata fields + optional pixel buffer)
//! - `DecoderRegistry`: extensible system for decoding dataset files
//! - Built-in decoders for JSON datasets and, with the `dicom` feature, DICOM files
//!
//! ## Adding New Formats
//!
//! 1. Create a new decoder in `loaders/` implementing `DatasetDecoder`
//! 2. Register it in `DecoderRegistry::new()`
//!
//! ```rust,ignore
//! use dcmview::data::{DatasetDecoder, LoaderError, Record};
//!
//! pub struct MyFormatLoader;
//!
//! impl DatasetDecoder for MyFormatLoader {
//!     fn id(&self) -> &'static str { "myformat" }
//!     fn display_name(&self) -> &'static str { "My Format" }
//!     fn extensions(&self) -> &'static [&'static str] { &["myf"] }
//!     fn decode(&self, path: &Path) -> Result<Record, LoaderError> { /* ... */ }
//! }
//! ```

mod loader;
pub mod loaders;
mod record;

pub use loader::{DatasetDecoder, DecoderRegistry, LoaderError};
pub use record::{Field, FieldValue, Fields, PixelData, Record};
