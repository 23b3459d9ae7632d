pub mod build;
pub mod completions;
pub mod init;
pub mod list;
pub mod validate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::manifest::{Manifest, ProjectConfig, MANIFEST_FILENAME};
use crate::output::{display_path, Printer};

/// koma - engraved shogi piece generator
#[derive(Parser, Debug)]
#[command(name = "koma")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print debug diagnostics
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render every piece in the catalog to PNG
    Build(build::BuildArgs),

    /// List the piece catalog
    List(list::ListArgs),

    /// Check that backgrounds and the font load, without rendering
    Validate(validate::ValidateArgs),

    /// Write a koma.yaml manifest with the default settings
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Options shared by commands that read project assets.
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root containing resources/ and fonts/
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Font file (overrides the manifest)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Output directory (overrides the manifest)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ProjectArgs {
    /// Resolve the project configuration: defaults, then koma.yaml, then flags.
    pub fn resolve(&self, printer: &Printer) -> Result<ProjectConfig> {
        let (manifest, found) = Manifest::find(&self.root)?;
        if found {
            printer.info(
                "Using",
                &display_path(&self.root.join(MANIFEST_FILENAME)),
            );
        }

        let mut config = ProjectConfig::from_manifest(&self.root, &manifest)?;
        if let Some(font) = &self.font {
            config.font = font.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        tracing::debug!(?config, "resolved project configuration");
        Ok(config)
    }
}
