//! Build command implementation.
//!
//! Renders the piece catalog and writes one PNG per piece.

use clap::Args;

use crate::assets::TrueTypeFontLoader;
use crate::error::{KomaError, Result};
use crate::generate::Generator;
use crate::output::{plural, Printer};
use crate::types::Catalog;

use super::ProjectArgs;

/// Render every piece in the catalog to PNG
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub project: ProjectArgs,

    /// Only render these pieces (repeatable)
    #[arg(long = "only", value_name = "ID")]
    pub only: Vec<String>,

    /// Exit with an error if any piece was skipped
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let config = args.project.resolve(printer)?;
    let catalog = Catalog::standard().filtered(&args.only)?;

    let fonts = TrueTypeFontLoader::new(&config.font);
    let report = Generator::new(&config, fonts, printer).generate_all(&catalog)?;

    if args.strict && !report.is_success() {
        return Err(KomaError::Build {
            message: format!(
                "{} of {} could not be rendered",
                plural(report.failed.len(), "piece", "pieces"),
                report.total()
            ),
            help: Some("Run `koma validate` to list missing assets".to_string()),
        });
    }

    Ok(())
}
