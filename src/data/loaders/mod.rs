//! Built-in dataset decoders.

#[cfg(feature = "dicom")]
mod dicom_loader;
mod json_loader;

#[cfg(feature = "dicom")]
pub use dicom_loader::DicomLoader;
pub use json_loader::JsonDatasetLoader;
