//! Per-piece rendering parameters.

use std::ops::Add;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{KomaError, Result};

/// A pixel coordinate with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A displacement applied to a [`Point`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, offset: Offset) -> Point {
        Point::new(self.x + offset.dx, self.y + offset.dy)
    }
}

/// Rendering parameters for a single piece image.
///
/// Built once through [`PieceSpec::new`], which validates the fields, and
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PieceSpec {
    id: String,
    base_image: PathBuf,
    font_size: u32,
    anchor: Point,
    glyph: char,
    promoted: bool,
    rotated: bool,
}

impl PieceSpec {
    /// Create a piece spec.
    ///
    /// Fails if `id` is empty or `font_size` is zero. Glyphs without a
    /// visible outline are accepted and simply render nothing.
    pub fn new(
        id: impl Into<String>,
        base_image: impl Into<PathBuf>,
        font_size: u32,
        anchor: Point,
        glyph: char,
        promoted: bool,
        rotated: bool,
    ) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(KomaError::Config {
                message: "Piece id must not be empty".to_string(),
                help: None,
            });
        }
        if id.contains(['/', '\\']) {
            return Err(KomaError::Config {
                message: format!("Piece id '{}' must not contain path separators", id),
                help: Some("The id is used as the output file name".to_string()),
            });
        }
        if font_size == 0 {
            return Err(KomaError::Config {
                message: format!("Piece '{}' has a zero font size", id),
                help: None,
            });
        }

        Ok(Self {
            id,
            base_image: base_image.into(),
            font_size,
            anchor,
            glyph,
            promoted,
            rotated,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Background image path, relative to the project root.
    pub fn base_image(&self) -> &Path {
        &self.base_image
    }

    /// Font size in pixels per em.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn promoted(&self) -> bool {
        self.promoted
    }

    pub fn rotated(&self) -> bool {
        self.rotated
    }

    /// Output file name, `<id>.png`.
    pub fn file_name(&self) -> String {
        format!("{}.png", self.id)
    }
}
