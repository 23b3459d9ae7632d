//! Orientation and PNG output for composited pieces.

use std::path::Path;

use image::{imageops, ImageFormat, RgbaImage};

use crate::error::{KomaError, Result};

/// Turn an image around for the opposing side.
///
/// Rotation is a 180° point reflection: pixel `(x, y)` moves to
/// `(width - 1 - x, height - 1 - y)`. Unrotated images pass through.
pub fn orient(image: RgbaImage, rotated: bool) -> RgbaImage {
    if rotated {
        imageops::rotate180(&image)
    } else {
        image
    }
}

/// Write an image as PNG, replacing any existing file at `path`.
pub fn write_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| KomaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write PNG: {}", e),
        })?;

    Ok(())
}
