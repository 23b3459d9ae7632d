//! Glyph rasterization.
//!
//! The compositor only needs per-pixel coverage for a single glyph, so
//! rasterization sits behind the small [`GlyphRasterizer`] trait.
//! [`PieceFont`] implements it with `ab_glyph` outlines.

use std::fmt;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};

use crate::types::Point;

/// Something that can draw one glyph as coverage values.
pub trait GlyphRasterizer {
    /// Draw `glyph` with its line box's top-left corner at `origin`.
    ///
    /// `plot` receives absolute pixel coordinates and a coverage value in
    /// `0.0..=1.0`. Coordinates may lie outside any image; callers clip.
    /// Control characters and glyphs the font lacks plot nothing.
    fn rasterize(&self, glyph: char, origin: Point, plot: &mut dyn FnMut(i32, i32, f32));
}

/// A loaded font with its pixel size baked in.
pub struct PieceFont {
    font: FontVec,
    scale: PxScale,
    size: u32,
}

impl PieceFont {
    /// Wrap a parsed font, scaling it so one em spans `size` pixels.
    pub fn new(font: FontVec, size: u32) -> Self {
        let em = size as f32;
        // PxScale is the ascent-to-descent height, not the em size.
        let scale = match font.units_per_em() {
            Some(units_per_em) if units_per_em > 0.0 => {
                PxScale::from(em * font.height_unscaled() / units_per_em)
            }
            _ => PxScale::from(em),
        };
        tracing::debug!(size, scale = scale.y, "scaled font");
        Self { font, scale, size }
    }

    /// Pixels per em.
    pub fn size(&self) -> u32 {
        self.size
    }
}

impl fmt::Debug for PieceFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceFont")
            .field("size", &self.size)
            .field("scale", &self.scale)
            .finish()
    }
}

impl GlyphRasterizer for PieceFont {
    fn rasterize(&self, glyph: char, origin: Point, plot: &mut dyn FnMut(i32, i32, f32)) {
        if glyph.is_control() {
            tracing::debug!(?glyph, "control character has no glyph");
            return;
        }
        // Glyph 0 is .notdef, the font's missing-glyph box.
        let id = self.font.glyph_id(glyph);
        if id.0 == 0 {
            tracing::debug!(?glyph, "glyph not in font");
            return;
        }

        let scaled = self.font.as_scaled(self.scale);
        let baseline = origin.y as f32 + scaled.ascent();
        let positioned = id.with_scale_and_position(self.scale, point(origin.x as f32, baseline));

        let Some(outlined) = self.font.outline_glyph(positioned) else {
            tracing::debug!(?glyph, "glyph has no outline");
            return;
        };

        let bounds = outlined.px_bounds();
        let left = bounds.min.x as i32;
        let top = bounds.min.y as i32;
        tracing::trace!(?glyph, left, top, right = bounds.max.x, bottom = bounds.max.y, "glyph bounds");

        outlined.draw(|x, y, coverage| {
            plot(left + x as i32, top + y as i32, coverage);
        });
    }
}
