//! Built-in dataset writers.

#[cfg(feature = "dicom")]
mod dicom;
mod json;

#[cfg(feature = "dicom")]
pub use dicom::DicomWriter;
pub use json::JsonDatasetWriter;
