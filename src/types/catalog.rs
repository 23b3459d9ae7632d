//! The built-in piece catalog.
//!
//! Every standard shogi piece is rendered in two orientations: sente (the
//! player at the bottom) and gote (the opponent, rotated 180°). Pieces come
//! in three background sizes, each with its own font size and glyph anchor.

use std::fmt;
use std::path::PathBuf;

use crate::error::{KomaError, Result};

use super::piece::{PieceSpec, Point};

/// Background size class of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn name(self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }

    pub fn font_size(self) -> u32 {
        match self {
            SizeClass::Small => 650,
            SizeClass::Medium => 680,
            SizeClass::Large => 720,
        }
    }

    pub fn anchor(self) -> Point {
        match self {
            SizeClass::Small => Point::new(420, 260),
            SizeClass::Medium => Point::new(400, 240),
            SizeClass::Large => Point::new(390, 160),
        }
    }
}

/// Which player a piece faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Sente,
    Gote,
}

impl Side {
    pub fn name(self) -> &'static str {
        match self {
            Side::Sente => "sente",
            Side::Gote => "gote",
        }
    }

    /// Gote pieces face the opponent, so their image is turned around.
    pub fn rotated(self) -> bool {
        matches!(self, Side::Gote)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Background image for a size class and side.
pub fn base_image_path(size: SizeClass, side: Side) -> PathBuf {
    PathBuf::from(format!(
        "resources/wood_piece_{}_{}.png",
        size.name(),
        side.name()
    ))
}

/// One row of the piece table: a piece kind and its glyph per side.
struct PieceKind {
    name: &'static str,
    size: SizeClass,
    promoted: bool,
    sente: char,
    gote: char,
}

const fn kind(name: &'static str, size: SizeClass, promoted: bool, glyph: char) -> PieceKind {
    PieceKind {
        name,
        size,
        promoted,
        sente: glyph,
        gote: glyph,
    }
}

const PIECE_KINDS: &[PieceKind] = &[
    kind("pawn", SizeClass::Small, false, '歩'),
    kind("pawn_promoted", SizeClass::Small, true, 'と'),
    kind("lance", SizeClass::Medium, false, '香'),
    kind("lance_promoted", SizeClass::Medium, true, '仝'),
    kind("knight", SizeClass::Medium, false, '桂'),
    kind("knight_promoted", SizeClass::Medium, true, '今'),
    kind("silver", SizeClass::Medium, false, '銀'),
    kind("silver_promoted", SizeClass::Medium, true, '全'),
    kind("gold", SizeClass::Medium, false, '金'),
    kind("bishop", SizeClass::Large, false, '角'),
    kind("bishop_promoted", SizeClass::Large, true, '馬'),
    kind("rook", SizeClass::Large, false, '飛'),
    kind("rook_promoted", SizeClass::Large, true, '竜'),
    // The king is 王 for sente and 玉 for gote.
    PieceKind {
        name: "king",
        size: SizeClass::Large,
        promoted: false,
        sente: '王',
        gote: '玉',
    },
];

/// An ordered, immutable table of piece specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    pieces: Vec<PieceSpec>,
}

impl Catalog {
    /// Build a catalog from specs, rejecting duplicate ids.
    pub fn new(pieces: Vec<PieceSpec>) -> Result<Self> {
        for (i, piece) in pieces.iter().enumerate() {
            if pieces[..i].iter().any(|p| p.id() == piece.id()) {
                return Err(KomaError::Config {
                    message: format!("Duplicate piece id '{}'", piece.id()),
                    help: None,
                });
            }
        }
        Ok(Self { pieces })
    }

    /// The standard shogi set: 14 piece kinds, each in sente and gote.
    pub fn standard() -> Self {
        let mut pieces = Vec::with_capacity(PIECE_KINDS.len() * 2);

        for kind in PIECE_KINDS {
            for side in [Side::Sente, Side::Gote] {
                let glyph = match side {
                    Side::Sente => kind.sente,
                    Side::Gote => kind.gote,
                };
                let spec = PieceSpec::new(
                    format!("{}_{}", kind.name, side),
                    base_image_path(kind.size, side),
                    kind.size.font_size(),
                    kind.size.anchor(),
                    glyph,
                    kind.promoted,
                    side.rotated(),
                );
                match spec {
                    Ok(spec) => pieces.push(spec),
                    Err(err) => {
                        tracing::error!(piece = kind.name, %side, %err, "invalid catalog row");
                        debug_assert!(false, "invalid catalog row {}: {err}", kind.name);
                    }
                }
            }
        }

        Self { pieces }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PieceSpec> {
        self.pieces.iter()
    }

    pub fn get(&self, id: &str) -> Option<&PieceSpec> {
        self.pieces.iter().find(|p| p.id() == id)
    }

    /// Restrict the catalog to the given ids, keeping catalog order.
    ///
    /// An empty filter keeps everything. Unknown ids are an error.
    pub fn filtered(&self, ids: &[String]) -> Result<Catalog> {
        if ids.is_empty() {
            return Ok(self.clone());
        }

        if let Some(unknown) = ids.iter().find(|id| self.get(id).is_none()) {
            return Err(KomaError::Config {
                message: format!("Unknown piece '{}'", unknown),
                help: Some("Run `koma list` to see the available pieces".to_string()),
            });
        }

        let pieces = self
            .pieces
            .iter()
            .filter(|p| ids.iter().any(|id| id == p.id()))
            .cloned()
            .collect();
        Ok(Catalog { pieces })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PieceSpec;
    type IntoIter = std::slice::Iter<'a, PieceSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}
