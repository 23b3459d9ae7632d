//! Loading of piece backgrounds and the kanji font.

use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontVec;
use image::RgbaImage;

use crate::engrave::{GlyphRasterizer, PieceFont};
use crate::error::{KomaError, Result};

/// Load a background image, converting it to RGBA8.
///
/// The conversion is unconditional so compositing can rely on four
/// channels even when the source has no alpha.
pub fn load_base_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path).map_err(|e| KomaError::AssetLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded base image");
    Ok(image.to_rgba8())
}

/// Load a TrueType/OpenType font at `size` pixels per em.
pub fn load_font(path: &Path, size: u32) -> Result<PieceFont> {
    let bytes = fs::read(path).map_err(|e| KomaError::FontLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let font = FontVec::try_from_vec(bytes).map_err(|e| KomaError::FontLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(PieceFont::new(font, size))
}

/// Supplies a sized font for each piece.
pub trait FontLoader {
    type Font: GlyphRasterizer;

    fn load(&self, size: u32) -> Result<Self::Font>;

    /// Path reported when loading fails.
    fn path(&self) -> &Path;
}

/// Loads fonts from a font file on disk.
#[derive(Debug, Clone)]
pub struct TrueTypeFontLoader {
    path: PathBuf,
}

impl TrueTypeFontLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FontLoader for TrueTypeFontLoader {
    type Font = PieceFont;

    fn load(&self, size: u32) -> Result<PieceFont> {
        load_font(&self.path, size)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
