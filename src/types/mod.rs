//! Core domain types for koma.
//!
//! - `Colour` - RGBA colour values and the engraving palette
//! - `PieceSpec` - rendering parameters for one piece image
//! - `Catalog` - the ordered table of all pieces

mod catalog;
mod colour;
mod piece;

pub use catalog::{base_image_path, Catalog, Side, SizeClass};
pub use colour::Colour;
pub use piece::{Offset, PieceSpec, Point};
