//! Orientation and serialization of finished piece images.

mod png;

pub use png::{orient, write_png};
