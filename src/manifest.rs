//! Project manifest (koma.yaml) and resolved project configuration.
//!
//! The manifest is optional. Without one, the project root is the current
//! directory, the font is `fonts/YujiMai-Regular.ttf`, output goes to
//! `build/` and the built-in engraving palette is used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engrave::EngraveStyle;
use crate::error::{KomaError, Result};
use crate::types::Colour;

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "koma.yaml";

/// Default font, relative to the project root.
pub const DEFAULT_FONT: &str = "fonts/YujiMai-Regular.ttf";

/// Default output directory, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "build";

/// Project manifest loaded from koma.yaml.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Project root, relative to the manifest's directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Font file, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<PathBuf>,

    /// Output directory, relative to the project root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Fill colour for regular pieces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Colour>,

    /// Fill colour for promoted pieces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promoted_fill: Option<Colour>,

    /// Shadow layer colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Colour>,

    /// Highlight layer colour.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<Colour>,
}

impl Manifest {
    /// Load manifest from a koma.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KomaError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| KomaError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Load `koma.yaml` from `dir` if present, otherwise the defaults.
    pub fn find(dir: &Path) -> Result<(Self, bool)> {
        let path = dir.join(MANIFEST_FILENAME);
        if path.is_file() {
            Ok((Self::load(&path)?, true))
        } else {
            Ok((Self::default(), false))
        }
    }

    /// Engraving style with this manifest's colour overrides applied.
    pub fn style(&self) -> EngraveStyle {
        let mut style = EngraveStyle::default();
        if let Some(fill) = self.fill {
            style.fill = fill;
        }
        if let Some(fill) = self.promoted_fill {
            style.promoted_fill = fill;
        }
        if let Some(colour) = self.shadow {
            style.shadow.colour = colour;
        }
        if let Some(colour) = self.highlight {
            style.highlight.colour = colour;
        }
        style
    }
}

/// Fully resolved configuration handed to the generator.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Directory that catalog image paths are relative to.
    pub root: PathBuf,
    pub font: PathBuf,
    pub output: PathBuf,
    pub style: EngraveStyle,
}

impl ProjectConfig {
    /// Defaults for a project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            font: root.join(DEFAULT_FONT),
            output: root.join(DEFAULT_OUTPUT),
            root,
            style: EngraveStyle::default(),
        }
    }

    /// Resolve a manifest found in `dir`.
    pub fn from_manifest(dir: &Path, manifest: &Manifest) -> Result<Self> {
        let root = match &manifest.root {
            Some(root) => dir.join(root),
            None => dir.to_path_buf(),
        };

        let style = manifest.style();
        for (name, colour) in [("fill", style.fill), ("promoted_fill", style.promoted_fill)] {
            if !colour.is_opaque() {
                return Err(KomaError::Config {
                    message: format!("{} colour {} must be fully opaque", name, colour),
                    help: Some("Use #RRGGBB or an alpha of FF".to_string()),
                });
            }
        }

        Ok(Self {
            font: root.join(manifest.font.as_deref().unwrap_or(Path::new(DEFAULT_FONT))),
            output: root.join(manifest.output.as_deref().unwrap_or(Path::new(DEFAULT_OUTPUT))),
            root,
            style,
        })
    }

    /// Resolve a catalog path against the project root.
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }
}
