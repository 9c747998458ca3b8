//! Display preparation: intensity normalization, tile layout and preview export.
//!
//! Nothing here is cached. Every call re-normalizes from the source buffers,
//! so what is displayed always reflects the current record contents.

pub mod export;
mod normalize;
mod tiles;

pub use normalize::{NormalizedBuffer, intensity_range, normalize, normalize_frame};
pub use tiles::{Tile, TileLayout, TilePosition, build_tiles};
