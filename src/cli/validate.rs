//! Validate command implementation.
//!
//! Loads every background the catalog references and the font, without
//! rendering anything.

use std::collections::BTreeSet;
use std::path::Path;

use clap::Args;

use crate::assets::{load_base_image, load_font};
use crate::error::{KomaError, Result};
use crate::manifest::ProjectConfig;
use crate::output::{display_path, plural, Printer};
use crate::types::Catalog;

use super::ProjectArgs;

/// Check that backgrounds and the font load, without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let config = args.project.resolve(printer)?;
    let catalog = Catalog::standard();

    let problems = check_assets(&config, &catalog);
    for problem in &problems {
        printer.error("Missing", &problem.to_string());
    }

    if problems.is_empty() {
        printer.status("Validated", &plural(catalog.len(), "piece", "pieces"));
        Ok(())
    } else {
        Err(KomaError::Build {
            message: format!(
                "{} found",
                plural(problems.len(), "problem", "problems")
            ),
            help: Some(format!("Asset paths are relative to {}", display_path(&config.root))),
        })
    }
}

/// Try loading every distinct background and the font.
///
/// Returns one load error per asset that failed.
pub fn check_assets(config: &ProjectConfig, catalog: &Catalog) -> Vec<KomaError> {
    let mut problems = Vec::new();

    let backgrounds: BTreeSet<&Path> = catalog.iter().map(|p| p.base_image()).collect();
    for background in backgrounds {
        if let Err(err) = load_base_image(&config.resolve(background)) {
            problems.push(err);
        }
    }

    if let Some(size) = catalog.iter().map(|p| p.font_size()).max() {
        if let Err(err) = load_font(&config.font, size) {
            problems.push(err);
        }
    }

    problems
}
