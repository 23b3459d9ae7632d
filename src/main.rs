use clap::Parser;
use miette::Result;
use koma::cli::{Cli, Commands};
use koma::output::Printer;
use tracing::Level;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => koma::cli::build::run(args, &printer)?,
        Commands::List(args) => koma::cli::list::run(args)?,
        Commands::Validate(args) => koma::cli::validate::run(args, &printer)?,
        Commands::Init(args) => koma::cli::init::run(args, &printer)?,
        Commands::Completions(args) => koma::cli::completions::run(args)?,
    }

    Ok(())
}
