//! Engraved glyph compositing.
//!
//! A glyph is not drawn flat. Three translucency masks are rendered from
//! the same glyph and used to paste solid colour layers onto a copy of the
//! background:
//!
//! 1. shadow - offset down-right and blurred, pasted first
//! 2. fill - the glyph itself at the anchor, pasted second
//! 3. highlight - offset up-left with a tighter blur, pasted last
//!
//! Pixels outside all three masks keep the background untouched.

mod glyph;

use image::{imageops, GrayImage, RgbaImage};

use crate::types::{Colour, Offset, Point};

pub use glyph::{GlyphRasterizer, PieceFont};

#[cfg(test)]
pub(crate) use glyph::testing;

/// Single-channel blend weights, one per target pixel.
pub type Mask = GrayImage;

/// Colour, displacement and blur of one shading layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    pub colour: Colour,
    pub offset: Offset,
    /// Gaussian standard deviation in pixels. Zero disables blurring.
    pub blur: f32,
}

/// Palette and shading parameters for the engraving effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngraveStyle {
    /// Fill for regular pieces.
    pub fill: Colour,
    /// Fill for promoted pieces.
    pub promoted_fill: Colour,
    pub shadow: LayerStyle,
    pub highlight: LayerStyle,
}

impl EngraveStyle {
    /// Fill colour for a piece, by promotion state.
    pub fn fill_colour(&self, promoted: bool) -> Colour {
        if promoted {
            self.promoted_fill
        } else {
            self.fill
        }
    }
}

impl Default for EngraveStyle {
    fn default() -> Self {
        Self {
            fill: Colour::ENGRAVE_FILL,
            promoted_fill: Colour::PROMOTED_FILL,
            shadow: LayerStyle {
                colour: Colour::BLACK,
                offset: Offset::new(2, 2),
                blur: 2.0,
            },
            // Same colour as the shadow; offset and blur set it apart.
            highlight: LayerStyle {
                colour: Colour::BLACK,
                offset: Offset::new(-1, -1),
                blur: 1.0,
            },
        }
    }
}

/// Render `glyph` into a fresh mask of `width` x `height`.
///
/// Background is 0, glyph interior 255, edges anti-aliased. Anything that
/// falls outside the mask is clipped.
pub fn render_mask<R>(width: u32, height: u32, glyph: char, anchor: Point, font: &R) -> Mask
where
    R: GlyphRasterizer + ?Sized,
{
    let mut mask = Mask::new(width, height);

    font.rasterize(glyph, anchor, &mut |x, y, coverage| {
        if x < 0 || y < 0 {
            return;
        }
        let Some(pixel) = mask.get_pixel_mut_checked(x as u32, y as u32) else {
            return;
        };
        let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
        pixel.0[0] = pixel.0[0].max(value);
    });

    mask
}

/// Gaussian-blur a mask. A non-positive radius returns an unchanged copy.
pub fn blur_mask(mask: &Mask, radius: f32) -> Mask {
    if radius <= 0.0 {
        return mask.clone();
    }
    imageops::blur(mask, radius)
}

/// Blend a solid colour into `dest`, weighted per pixel by `mask`.
///
/// Weight 0 leaves a pixel bit-identical, 255 replaces it with `colour`,
/// anything in between is a linear blend of all four channels.
pub fn paste_with_mask(dest: &mut RgbaImage, colour: Colour, mask: &Mask) {
    for (x, y, weight) in mask.enumerate_pixels() {
        let weight = weight.0[0];
        if weight == 0 {
            continue;
        }
        if let Some(pixel) = dest.get_pixel_mut_checked(x, y) {
            *pixel = colour.blend_over(*pixel, weight);
        }
    }
}

/// The three masks used for one engraved glyph.
#[derive(Debug, Clone)]
pub struct EngraveMasks {
    pub shadow: Mask,
    pub text: Mask,
    pub highlight: Mask,
}

impl EngraveMasks {
    /// Render the text, shadow and highlight masks for a target size.
    pub fn render<R>(
        width: u32,
        height: u32,
        glyph: char,
        anchor: Point,
        font: &R,
        style: &EngraveStyle,
    ) -> Self
    where
        R: GlyphRasterizer + ?Sized,
    {
        let text = render_mask(width, height, glyph, anchor, font);

        let shadow = render_mask(width, height, glyph, anchor + style.shadow.offset, font);
        let shadow = blur_mask(&shadow, style.shadow.blur);

        let highlight = render_mask(width, height, glyph, anchor + style.highlight.offset, font);
        let highlight = blur_mask(&highlight, style.highlight.blur);

        Self {
            shadow,
            text,
            highlight,
        }
    }

    /// Whether `(x, y)` is zero in every mask.
    pub fn is_clear_at(&self, x: u32, y: u32) -> bool {
        [&self.shadow, &self.text, &self.highlight]
            .iter()
            .all(|mask| mask.get_pixel(x, y).0[0] == 0)
    }
}

/// Composite an engraved glyph onto a copy of `base`.
///
/// The result has the same dimensions as `base`; `base` itself is not
/// modified. A glyph that renders nothing yields an identical copy.
pub fn composite_engraved<R>(
    base: &RgbaImage,
    glyph: char,
    anchor: Point,
    font: &R,
    fill: Colour,
    style: &EngraveStyle,
) -> RgbaImage
where
    R: GlyphRasterizer + ?Sized,
{
    let (width, height) = base.dimensions();
    let masks = EngraveMasks::render(width, height, glyph, anchor, font, style);

    tracing::debug!(
        ?glyph,
        x = anchor.x,
        y = anchor.y,
        %fill,
        shadow_blur = style.shadow.blur,
        highlight_blur = style.highlight.blur,
        "compositing engraved glyph"
    );

    let mut output = base.clone();
    paste_with_mask(&mut output, style.shadow.colour, &masks.shadow);
    paste_with_mask(&mut output, fill, &masks.text);
    paste_with_mask(&mut output, style.highlight.colour, &masks.highlight);
    output
}

#[cfg(test)]
mod tests {
    use super::testing::BlockFont;
    use super::*;
    use image::Rgba;

    const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    fn grey_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, GREY)
    }

    /// Sharp layers with a white highlight so each layer is identifiable.
    fn sharp_style() -> EngraveStyle {
        EngraveStyle {
            shadow: LayerStyle {
                colour: Colour::rgb(0, 0, 255),
                offset: Offset::new(2, 2),
                blur: 0.0,
            },
            highlight: LayerStyle {
                colour: Colour::rgb(255, 255, 255),
                offset: Offset::new(-1, -1),
                blur: 0.0,
            },
            ..EngraveStyle::default()
        }
    }

    #[test]
    fn test_default_style_values() {
        let style = EngraveStyle::default();
        assert_eq!(style.fill, Colour::rgb(40, 25, 15));
        assert_eq!(style.promoted_fill, Colour::rgb(200, 30, 30));
        assert_eq!(style.shadow.offset, Offset::new(2, 2));
        assert_eq!(style.shadow.blur, 2.0);
        assert_eq!(style.highlight.offset, Offset::new(-1, -1));
        assert_eq!(style.highlight.blur, 1.0);
        assert_eq!(style.shadow.colour, Colour::BLACK);
        assert_eq!(style.highlight.colour, Colour::BLACK);
    }

    #[test]
    fn test_fill_colour_by_promotion() {
        let style = EngraveStyle::default();
        assert_eq!(style.fill_colour(true), Colour::PROMOTED_FILL);
        assert_eq!(style.fill_colour(false), Colour::ENGRAVE_FILL);
    }

    #[test]
    fn test_render_mask_block() {
        let font = BlockFont::new('歩', 3, 2);
        let mask = render_mask(8, 8, '歩', Point::new(2, 4), &font);

        assert_eq!(mask.dimensions(), (8, 8));
        assert_eq!(mask.get_pixel(2, 4).0[0], 255);
        assert_eq!(mask.get_pixel(4, 5).0[0], 255);
        assert_eq!(mask.get_pixel(5, 4).0[0], 0);
        assert_eq!(mask.get_pixel(2, 6).0[0], 0);
        assert_eq!(mask.pixels().filter(|p| p.0[0] == 255).count(), 6);
    }

    #[test]
    fn test_render_mask_clips_out_of_range() {
        let font = BlockFont::new('歩', 4, 4);
        let mask = render_mask(4, 4, '歩', Point::new(-2, 2), &font);

        // Only the 2x2 overlap with the image survives.
        assert_eq!(mask.pixels().filter(|p| p.0[0] == 255).count(), 4);
        assert_eq!(mask.get_pixel(0, 2).0[0], 255);
        assert_eq!(mask.get_pixel(1, 3).0[0], 255);
    }

    #[test]
    fn test_render_mask_unknown_glyph_is_empty() {
        let font = BlockFont::new('歩', 4, 4);
        let mask = render_mask(8, 8, '\u{7}', Point::new(1, 1), &font);
        assert!(mask.pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_blur_mask_zero_radius_is_identity() {
        let font = BlockFont::new('歩', 3, 3);
        let mask = render_mask(8, 8, '歩', Point::new(2, 2), &font);
        assert_eq!(blur_mask(&mask, 0.0), mask);
    }

    #[test]
    fn test_blur_mask_spreads_edges() {
        let font = BlockFont::new('歩', 6, 6);
        let mask = render_mask(20, 20, '歩', Point::new(7, 7), &font);
        let blurred = blur_mask(&mask, 2.0);

        assert_eq!(blurred.dimensions(), mask.dimensions());
        // Just outside the block picks up a penumbra.
        assert!(blurred.get_pixel(6, 9).0[0] > 0);
        // The edge itself softens.
        assert!(blurred.get_pixel(7, 9).0[0] < 255);
        // Far corners stay empty.
        assert_eq!(blurred.get_pixel(0, 0).0[0], 0);
        assert_eq!(blurred.get_pixel(19, 19).0[0], 0);
    }

    #[test]
    fn test_paste_with_mask_weights() {
        let mut dest = grey_image(3, 1);
        let mut mask = Mask::new(3, 1);
        mask.put_pixel(1, 0, image::Luma([255]));
        mask.put_pixel(2, 0, image::Luma([128]));

        paste_with_mask(&mut dest, Colour::BLACK, &mask);

        assert_eq!(*dest.get_pixel(0, 0), GREY);
        assert_eq!(*dest.get_pixel(1, 0), Rgba([0, 0, 0, 255]));
        // (128 * 127 + 127) / 255 = 64
        assert_eq!(*dest.get_pixel(2, 0), Rgba([64, 64, 64, 255]));
    }

    #[test]
    fn test_composite_preserves_dimensions_and_input() {
        let base = grey_image(40, 30);
        let font = BlockFont::new('歩', 10, 10);
        let output = composite_engraved(
            &base,
            '歩',
            Point::new(12, 8),
            &font,
            Colour::ENGRAVE_FILL,
            &EngraveStyle::default(),
        );

        assert_eq!(output.dimensions(), (40, 30));
        assert!(base.pixels().all(|p| *p == GREY));
        assert_ne!(output, base);
    }

    #[test]
    fn test_composite_empty_glyph_is_identity() {
        let base = grey_image(16, 16);
        let font = BlockFont::new('歩', 8, 8);
        let output = composite_engraved(
            &base,
            '\u{0}',
            Point::new(4, 4),
            &font,
            Colour::PROMOTED_FILL,
            &EngraveStyle::default(),
        );
        assert_eq!(output, base);
    }

    #[test]
    fn test_composite_leaves_unmasked_pixels_untouched() {
        let mut base = grey_image(32, 32);
        // Give the background some grain so untouched means bit-identical.
        for (x, y, pixel) in base.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 7) as u8, (y * 5) as u8, ((x + y) * 3) as u8, 255]);
        }
        let font = BlockFont::new('歩', 8, 8);
        let style = EngraveStyle::default();
        let anchor = Point::new(10, 10);

        let output = composite_engraved(&base, '歩', anchor, &font, Colour::ENGRAVE_FILL, &style);
        let masks = EngraveMasks::render(32, 32, '歩', anchor, &font, &style);

        let mut clear = 0;
        for (x, y, pixel) in output.enumerate_pixels() {
            if masks.is_clear_at(x, y) {
                assert_eq!(pixel, base.get_pixel(x, y), "pixel ({x}, {y}) changed");
                clear += 1;
            }
        }
        assert!(clear > 0);
        for (x, y) in [(0, 0), (31, 0), (0, 31), (31, 31)] {
            assert_eq!(output.get_pixel(x, y), base.get_pixel(x, y));
        }
    }

    #[test]
    fn test_composite_layer_order() {
        let base = grey_image(20, 20);
        let font = BlockFont::new('歩', 6, 6);
        let fill = Colour::ENGRAVE_FILL;
        let output = composite_engraved(&base, '歩', Point::new(5, 5), &font, fill, &sharp_style());

        // Interior: highlight is pasted last and covers the fill.
        assert_eq!(*output.get_pixel(7, 7), Rgba([255, 255, 255, 255]));
        // Right rim: inside the glyph, outside the highlight, so fill wins
        // over the shadow beneath it.
        assert_eq!(*output.get_pixel(10, 7), Rgba::from(fill));
        // Below-right of the glyph only the shadow reaches.
        assert_eq!(*output.get_pixel(12, 12), Rgba([0, 0, 255, 255]));
        // Above-left only the highlight reaches.
        assert_eq!(*output.get_pixel(4, 4), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_composite_promoted_fill_on_rim() {
        let base = grey_image(20, 20);
        let font = BlockFont::new('と', 6, 6);
        let style = sharp_style();
        let fill = style.fill_colour(true);
        let output = composite_engraved(&base, 'と', Point::new(5, 5), &font, fill, &style);

        assert_eq!(*output.get_pixel(10, 8), Rgba([200, 30, 30, 255]));
        assert_eq!(*output.get_pixel(8, 10), Rgba([200, 30, 30, 255]));
    }

    #[test]
    fn test_composite_default_style_darkens_glyph() {
        let base = grey_image(80, 80);
        let font = BlockFont::new('歩', 30, 30);
        let output = composite_engraved(
            &base,
            '歩',
            Point::new(25, 25),
            &font,
            Colour::ENGRAVE_FILL,
            &EngraveStyle::default(),
        );

        let centre = output.get_pixel(40, 40);
        assert!(centre.0[..3].iter().all(|&c| c < 128));
        // Soft dark rim just outside the lower-right edge.
        let rim = output.get_pixel(56, 40);
        assert!(rim.0[0] < 128 && rim.0[0] > 0);
        assert_eq!(*output.get_pixel(0, 0), GREY);
        assert_eq!(*output.get_pixel(79, 79), GREY);
    }
}
