//! Intensity normalization to 8-bit grayscale.

use ndarray::{Array2, ArrayView2};

use crate::data::PixelData;

/// 8-bit grayscale buffer ready for display.
pub type NormalizedBuffer = Array2<u8>;

/// Finite (min, max) of a buffer, or `None` if it has no finite samples.
pub fn intensity_range(buffer: ArrayView2<'_, f32>) -> Option<(f32, f32)> {
    buffer
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |range, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Linearly rescale a buffer so its own minimum maps to 0 and its maximum
/// to 255.
///
/// The range is taken from this buffer alone. A constant, empty or
/// all-non-finite buffer has no usable range and yields all zeros.
/// Non-finite samples map to 0.
pub fn normalize(buffer: ArrayView2<'_, f32>) -> NormalizedBuffer {
    let range = intensity_range(buffer).filter(|(lo, hi)| hi > lo);

    let Some((lo, hi)) = range else {
        log::trace!("Degenerate buffer {:?}, emitting zeros", buffer.dim());
        return Array2::zeros(buffer.dim());
    };

    let span = f64::from(hi) - f64::from(lo);
    buffer.mapv(|v| {
        if !v.is_finite() {
            return 0;
        }
        let scaled = (f64::from(v) - f64::from(lo)) / span * 255.0;
        scaled.round().clamp(0.0, 255.0) as u8
    })
}

/// Normalize one frame of a pixel buffer. Returns `None` if the frame does
/// not exist.
pub fn normalize_frame(pixels: &PixelData, index: usize) -> Option<NormalizedBuffer> {
    pixels.frame(index).map(normalize)
}
