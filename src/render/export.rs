//! Preview export: PNG contact sheets and animated GIF cine loops.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::imageops::{self, FilterType};
use image::{Delay, DynamicImage, Frame, GrayImage, Luma};

use crate::error::ViewerError;
use crate::render::normalize::NormalizedBuffer;
use crate::render::tiles::{Tile, TileLayout};

/// Convert a normalized buffer into a grayscale image.
pub fn to_gray_image(buffer: &NormalizedBuffer) -> GrayImage {
    let (rows, cols) = buffer.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([buffer[[y as usize, x as usize]]])
    })
}

/// Scale an image to fit inside a `max_size` square, keeping aspect ratio.
pub fn fit_within(img: &GrayImage, max_size: u32) -> GrayImage {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || max_size == 0 {
        return GrayImage::new(0, 0);
    }

    let scale = (max_size as f32 / w as f32).min(max_size as f32 / h as f32);
    let scaled_w = ((w as f32 * scale).round() as u32).clamp(1, max_size);
    let scaled_h = ((h as f32 * scale).round() as u32).clamp(1, max_size);

    imageops::resize(img, scaled_w, scaled_h, FilterType::Triangle)
}

/// Compose tiles into a single grid image, each tile centered in a
/// `tile_size` cell.
pub fn contact_sheet(tiles: &[Tile], layout: TileLayout, tile_size: u32) -> GrayImage {
    let columns = layout.columns().min(tiles.len()).max(1) as u32;
    let rows = layout.rows_for(tiles.len()).max(1) as u32;
    let mut sheet = GrayImage::new(columns * tile_size, rows * tile_size);

    for tile in tiles {
        let scaled = fit_within(&to_gray_image(&tile.buffer), tile_size);
        let offset_x = (tile_size.saturating_sub(scaled.width())) / 2;
        let offset_y = (tile_size.saturating_sub(scaled.height())) / 2;
        let x = tile.position.col as u32 * tile_size + offset_x;
        let y = tile.position.row as u32 * tile_size + offset_y;
        imageops::overlay(&mut sheet, &scaled, i64::from(x), i64::from(y));
    }

    sheet
}

/// Write a contact sheet of `tiles` as an image file (format from the
/// extension, usually PNG).
pub fn write_contact_sheet(
    path: &Path,
    tiles: &[Tile],
    layout: TileLayout,
    tile_size: u32,
) -> Result<(), ViewerError> {
    let sheet = contact_sheet(tiles, layout, tile_size);
    sheet.save(path)?;
    log::info!(
        "Wrote {}x{} contact sheet with {} tiles to {:?}",
        sheet.width(),
        sheet.height(),
        tiles.len(),
        path
    );
    Ok(())
}

/// Write cine frames as a looping animated GIF, one frame per `interval`.
pub fn write_cine_gif<I>(
    path: &Path,
    frames: I,
    interval: Duration,
    frame_size: u32,
) -> Result<usize, ViewerError>
where
    I: IntoIterator<Item = NormalizedBuffer>,
{
    let delay = Delay::from_saturating_duration(interval);
    let frames: Vec<Frame> = frames
        .into_iter()
        .map(|buffer| {
            let scaled = fit_within(&to_gray_image(&buffer), frame_size);
            Frame::from_parts(DynamicImage::ImageLuma8(scaled).to_rgba8(), 0, 0, delay)
        })
        .collect();
    let count = frames.len();

    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite)?;
    encoder.encode_frames(frames)?;

    log::info!("Wrote {} cine frames to {:?}", count, path);
    Ok(count)
}
