//! dcmview - medical image folder viewer core
//!
//! Loads a folder of image datasets, decides whether it is one multi-frame
//! volume (played back as a cine loop) or a set of single-frame files (shown
//! as a tile grid), normalizes pixel intensities to 8-bit grayscale, exposes
//! metadata for inspection and writes anonymized copies.
//!
//! [`state::ViewerSession`] is the entry point for front ends.

pub mod anonymize;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod format;
pub mod metadata;
pub mod playback;
pub mod render;
pub mod state;

#[cfg(test)]
mod testing;

pub use error::ViewerError;
pub use state::ViewerSession;
