//! Row-major tile grid for multi-file collections.

use crate::constants::DEFAULT_TILE_COLUMNS;
use crate::data::Record;
use crate::error::ViewerError;
use crate::render::normalize::{NormalizedBuffer, normalize_frame};

/// Grid cell of a tile, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePosition {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
}

/// Maps linear record indices to grid cells in reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayout {
    columns: usize,
}

impl TileLayout {
    /// Create a layout with the given number of columns (at least 1).
    pub fn new(columns: usize) -> Self {
        Self {
            columns: columns.max(1),
        }
    }

    /// Number of columns.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Grid cell of the tile at `index`.
    pub fn position_of(&self, index: usize) -> TilePosition {
        TilePosition {
            row: index / self.columns,
            col: index % self.columns,
        }
    }

    /// Number of rows needed for `count` tiles.
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }
}

impl Default for TileLayout {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_COLUMNS)
    }
}

/// One displayed record in multi-file mode.
#[derive(Debug, Clone)]
pub struct Tile {
    /// Index of the record in the collection
    pub index: usize,
    /// Grid cell
    pub position: TilePosition,
    /// Normalized first frame of the record
    pub buffer: NormalizedBuffer,
}

/// Normalize every record into a tile. Buffers are rebuilt on each call.
pub fn build_tiles(records: &[Record], layout: TileLayout) -> Result<Vec<Tile>, ViewerError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| -> Result<Tile, ViewerError> {
            let buffer = record
                .pixels
                .as_ref()
                .and_then(|pixels| normalize_frame(pixels, 0))
                .ok_or(ViewerError::MissingPixelData { index })?;
            Ok(Tile {
                index,
                position: layout.position_of(index),
                buffer,
            })
        })
        .collect()
}
