//! List command implementation.
//!
//! Prints the piece catalog to stdout, as a table or as JSON.

use clap::Args;

use crate::error::{KomaError, Result};
use crate::types::{Catalog, PieceSpec};

/// List the piece catalog
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ListArgs) -> Result<()> {
    let catalog = Catalog::standard();

    let text = if args.json {
        catalog_json(&catalog)?
    } else {
        catalog_table(&catalog)
    };
    println!("{}", text);

    Ok(())
}

/// One line per piece: id, glyph, font size, anchor, promotion, rotation, background.
pub fn catalog_table(catalog: &Catalog) -> String {
    catalog.iter().map(table_row).collect::<Vec<_>>().join("\n")
}

fn table_row(spec: &PieceSpec) -> String {
    let anchor = format!("({}, {})", spec.anchor().x, spec.anchor().y);
    let promoted = if spec.promoted() { "promoted" } else { "-" };
    let rotation = if spec.rotated() { "180°" } else { "0°" };
    format!(
        "{:<22} {} {:>4} {:<11} {:<8} {:<4} {}",
        spec.id(),
        spec.glyph(),
        spec.font_size(),
        anchor,
        promoted,
        rotation,
        spec.base_image().display()
    )
}

/// The catalog as a pretty-printed JSON array.
pub fn catalog_json(catalog: &Catalog) -> Result<String> {
    let pieces: Vec<&PieceSpec> = catalog.iter().collect();
    serde_json::to_string_pretty(&pieces).map_err(|e| KomaError::Build {
        message: format!("Failed to serialize catalog: {}", e),
        help: None,
    })
}
