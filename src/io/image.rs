//! PNG export of tile matrices through the tile palette

use crate::io::configuration::TILE_PALETTE;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::TileMatrix;
use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

// Unknown ordinals render transparent
fn tile_color(tile: u8) -> Rgba<u8> {
    Rgba(
        TILE_PALETTE
            .get(tile as usize)
            .copied()
            .unwrap_or([0, 0, 0, 0]),
    )
}

/// Render a tile matrix with `scale x scale` pixels per tile
///
/// # Errors
///
/// Returns `InvalidParameter` for a zero scale or an image too large to address
pub fn render_tiles(tiles: &TileMatrix, scale: u32) -> Result<RgbaImage> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be positive"));
    }
    let (rows, cols) = tiles.dim();
    let width = u32::try_from(cols)
        .ok()
        .and_then(|w| w.checked_mul(scale))
        .ok_or_else(|| invalid_parameter("width", &cols, &"image too large"))?;
    let height = u32::try_from(rows)
        .ok()
        .and_then(|h| h.checked_mul(scale))
        .ok_or_else(|| invalid_parameter("height", &rows, &"image too large"))?;

    Ok(ImageBuffer::from_fn(width, height, |px, py| {
        let tile = tiles
            .get([(py / scale) as usize, (px / scale) as usize])
            .copied()
            .unwrap_or(u8::MAX);
        tile_color(tile)
    }))
}

/// Export a tile matrix as a PNG image
///
/// # Errors
///
/// Returns an error if:
/// - The scale is zero or the image is too large
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_tiles_as_png(tiles: &TileMatrix, scale: u32, output_path: &Path) -> Result<()> {
    let img = render_tiles(tiles, scale)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
