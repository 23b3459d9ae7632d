//! Progress lines for `koma` runs.
//!
//! Each line is a right-aligned verb followed by a message, e.g.
//! `   Rendering pawn_sente` or `    Skipping lance_gote`. Lines go to
//! stderr so `koma list --json` can own stdout.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

const VERB_WIDTH: usize = 12;

/// How a line is coloured, and whether quiet mode hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Progress,
    Info,
    Warning,
    Error,
}

impl Tone {
    fn ansi(self) -> &'static str {
        match self {
            Tone::Progress => "\x1b[32m",
            Tone::Info => "\x1b[36m",
            Tone::Warning => "\x1b[33m",
            Tone::Error => "\x1b[31m",
        }
    }

    fn hidden_when_quiet(self) -> bool {
        matches!(self, Tone::Progress | Tone::Info)
    }
}

/// Writes progress lines for a batch, coloured when stderr is a terminal.
#[derive(Debug, Clone)]
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
            quiet: false,
        }
    }

    /// Only skipped pieces and errors are printed.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::new()
        }
    }

    /// A step of the pipeline, such as `Rendering` or `Wrote`.
    pub fn status(&self, verb: &str, message: &str) {
        self.line(Tone::Progress, verb, message);
    }

    /// Side notes such as `Created` for the output directory.
    pub fn info(&self, verb: &str, message: &str) {
        self.line(Tone::Info, verb, message);
    }

    /// A piece that was skipped.
    pub fn warning(&self, verb: &str, message: &str) {
        self.line(Tone::Warning, verb, message);
    }

    pub fn error(&self, verb: &str, message: &str) {
        self.line(Tone::Error, verb, message);
    }

    /// De-emphasised text, e.g. the arrow between a piece and its file.
    pub fn dim(&self, text: &str) -> String {
        if self.color {
            format!("{DIM}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn line(&self, tone: Tone, verb: &str, message: &str) {
        if self.quiet && tone.hidden_when_quiet() {
            return;
        }
        let mut stderr = io::stderr().lock();
        // A closed stderr must not abort a batch.
        let _ = if self.color {
            writeln!(stderr, "{BOLD}{}{verb:>VERB_WIDTH$}{RESET} {message}", tone.ansi())
        } else {
            writeln!(stderr, "{verb:>VERB_WIDTH$} {message}")
        };
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// `plural(28, "piece", "pieces")` gives "28 pieces".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    let noun = if n == 1 { singular } else { pluralized };
    format!("{n} {noun}")
}

/// `path` relative to the working directory when it lies inside it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));
    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
