//! Dataset serialization.
//!
//! Writers turn an in-memory [`Record`](crate::data::Record) back into a file.
//! The anonymizer hands every de-identified record to a `DatasetWriter`.
//!
//! ## Supported Formats
//!
//! - **JSON dataset**: lossless dump of fields and pixel buffer
//! - **DICOM** (feature `dicom`): re-encodes the source file with changed
//!   text elements applied
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dcmview::format::WriterRegistry;
//!
//! let registry = WriterRegistry::new();
//! let writer = registry.get("json").unwrap();
//! writer.write(&record, Path::new("out/anonymized_1.json"))?;
//! ```

mod error;
pub mod formats;
mod registry;
mod traits;

pub use error::WriteError;
pub use registry::WriterRegistry;
pub use traits::DatasetWriter;
