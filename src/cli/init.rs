//! Init command implementation.
//!
//! Writes a `koma.yaml` manifest spelling out the default settings.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::engrave::EngraveStyle;
use crate::error::{KomaError, Result};
use crate::manifest::{DEFAULT_FONT, DEFAULT_OUTPUT, MANIFEST_FILENAME};
use crate::output::{display_path, Printer};

/// Write a koma.yaml manifest with the default settings
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing koma.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(KomaError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::write(&manifest_path, default_manifest()).map_err(|e| KomaError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.status("Created", &display_path(&manifest_path));
    Ok(())
}

/// Manifest text with every setting at its default value.
fn default_manifest() -> String {
    let style = EngraveStyle::default();

    // Built by hand so the file keeps its comments.
    let mut yaml = String::new();
    yaml.push_str("# Paths are relative to this file.\n");
    yaml.push_str(&format!("font: {}\n", DEFAULT_FONT));
    yaml.push_str(&format!("output: {}\n", DEFAULT_OUTPUT));
    yaml.push_str("\n# Engraving colours (#RRGGBB).\n");
    yaml.push_str(&format!("fill: \"{}\"\n", style.fill));
    yaml.push_str(&format!("promoted_fill: \"{}\"\n", style.promoted_fill));
    yaml.push_str(&format!("shadow: \"{}\"\n", style.shadow.colour));
    yaml.push_str(&format!("highlight: \"{}\"\n", style.highlight.colour));
    yaml
}
