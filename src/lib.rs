//! koma - engraved shogi piece generator
//!
//! Renders a fixed catalog of shogi piece images by compositing a kanji
//! glyph, with engraved shadow and highlight shading, onto wooden piece
//! backgrounds.

pub mod assets;
pub mod cli;
pub mod engrave;
pub mod error;
pub mod generate;
pub mod manifest;
pub mod output;
pub mod render;
pub mod types;

pub use assets::{load_base_image, load_font, FontLoader, TrueTypeFontLoader};
pub use engrave::{
    blur_mask, composite_engraved, paste_with_mask, render_mask, EngraveMasks, EngraveStyle,
    GlyphRasterizer, LayerStyle, Mask, PieceFont,
};
pub use error::{KomaError, Result};
pub use generate::{ensure_output_dir, BatchReport, Generator};
pub use manifest::{Manifest, ProjectConfig};
pub use render::{orient, write_png};
pub use types::{Catalog, Colour, Offset, PieceSpec, Point, Side, SizeClass};
