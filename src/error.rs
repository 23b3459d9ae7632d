use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for koma operations
#[derive(Error, Diagnostic, Debug)]
pub enum KomaError {
    #[error("Cannot load image '{}': {}", .path.display(), .message)]
    #[diagnostic(code(koma::asset))]
    AssetLoad { path: PathBuf, message: String },

    #[error("Cannot load font '{}': {}", .path.display(), .message)]
    #[diagnostic(code(koma::font))]
    FontLoad { path: PathBuf, message: String },

    #[error("IO error with {}: {}", .path.display(), .message)]
    #[diagnostic(code(koma::io))]
    Io { path: PathBuf, message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(koma::config))]
    Config {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Build error: {message}")]
    #[diagnostic(code(koma::build))]
    Build {
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl KomaError {
    /// Whether this error only affects a single catalog entry.
    ///
    /// Load failures skip the entry; anything else aborts the batch.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, KomaError::AssetLoad { .. } | KomaError::FontLoad { .. })
    }
}

pub type Result<T> = std::result::Result<T, KomaError>;
