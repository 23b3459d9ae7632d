//! Batch generation of piece images.
//!
//! For each catalog entry, in order: load the background and font, pick
//! the fill colour, composite the engraved glyph, orient, and save. Load
//! failures skip only the affected entry. Anything else (an unwritable
//! output directory, a failed PNG write) aborts the batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::{load_base_image, FontLoader};
use crate::engrave::composite_engraved;
use crate::error::{KomaError, Result};
use crate::manifest::ProjectConfig;
use crate::output::{display_path, plural, Printer};
use crate::render::{orient, write_png};
use crate::types::{Catalog, PieceSpec};

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Ids of pieces written, in catalog order.
    pub generated: Vec<String>,
    /// Pieces skipped because an asset or the font failed to load.
    pub failed: Vec<(String, KomaError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total(&self) -> usize {
        self.generated.len() + self.failed.len()
    }
}

/// Create the output directory if it does not exist yet.
pub fn ensure_output_dir(path: &Path, printer: &Printer) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| KomaError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })?;
    printer.info("Created", &display_path(path));
    Ok(())
}

/// Renders catalog entries using a project configuration and font source.
pub struct Generator<'a, L: FontLoader> {
    config: &'a ProjectConfig,
    fonts: L,
    printer: &'a Printer,
}

impl<'a, L: FontLoader> Generator<'a, L> {
    pub fn new(config: &'a ProjectConfig, fonts: L, printer: &'a Printer) -> Self {
        Self {
            config,
            fonts,
            printer,
        }
    }

    /// Output path for a piece.
    pub fn output_path(&self, spec: &PieceSpec) -> PathBuf {
        self.config.output.join(spec.file_name())
    }

    /// Render one piece and write it to the output directory.
    ///
    /// Returns the written path.
    pub fn generate_piece(&self, spec: &PieceSpec) -> Result<PathBuf> {
        let _span = tracing::debug_span!("piece", id = spec.id()).entered();

        let base = load_base_image(&self.config.resolve(spec.base_image()))?;
        let font = self.fonts.load(spec.font_size())?;
        tracing::debug!(font = %self.fonts.path().display(), size = spec.font_size(), "loaded font");

        let fill = self.config.style.fill_colour(spec.promoted());
        let colour_name = if spec.promoted() {
            "promoted"
        } else {
            "standard"
        };
        self.printer.status(
            "Rendering",
            &format!(
                "{} {}",
                spec.id(),
                self.printer.dim(&format!(
                    "('{}', size {}, at ({}, {}), {} {})",
                    spec.glyph(),
                    spec.font_size(),
                    spec.anchor().x,
                    spec.anchor().y,
                    colour_name,
                    fill
                ))
            ),
        );

        let composite = composite_engraved(
            &base,
            spec.glyph(),
            spec.anchor(),
            &font,
            fill,
            &self.config.style,
        );

        if spec.rotated() {
            tracing::debug!("rotating 180°");
        }
        let image = orient(composite, spec.rotated());

        let path = self.output_path(spec);
        write_png(&image, &path)?;
        self.printer.status("Wrote", &display_path(&path));

        Ok(path)
    }

    /// Render every catalog entry, skipping those whose assets fail to load.
    pub fn generate_all(&self, catalog: &Catalog) -> Result<BatchReport> {
        ensure_output_dir(&self.config.output, self.printer)?;

        let mut report = BatchReport::default();

        for spec in catalog {
            match self.generate_piece(spec) {
                Ok(_) => report.generated.push(spec.id().to_string()),
                Err(err) if err.is_load_failure() => {
                    self.printer
                        .warning("Skipping", &format!("{}: {}", spec.id(), err));
                    report.failed.push((spec.id().to_string(), err));
                }
                Err(err) => return Err(err),
            }
        }

        let summary = format!(
            "{} in {}",
            plural(report.generated.len(), "piece", "pieces"),
            display_path(&self.config.output)
        );
        if report.is_success() {
            self.printer.status("Finished", &summary);
        } else {
            self.printer.warning(
                "Finished",
                &format!("{} ({} skipped)", summary, report.failed.len()),
            );
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TrueTypeFontLoader;
    use crate::engrave::testing::BlockFont;
    use crate::engrave::{EngraveStyle, LayerStyle};
    use crate::types::{Colour, Offset, Point};
    use image::{imageops, Rgba, RgbaImage};
    use tempfile::{tempdir, TempDir};

    const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);

    /// Draws every glyph as a block half the font size wide.
    struct BlockFontLoader;

    impl FontLoader for BlockFontLoader {
        type Font = BlockFont;

        fn load(&self, size: u32) -> Result<BlockFont> {
            Ok(BlockFont::new('*', size as i32 / 2, size as i32 / 2))
        }

        fn path(&self) -> &Path {
            Path::new("block")
        }
    }

    fn project() -> (TempDir, ProjectConfig) {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("resources")).unwrap();
        RgbaImage::from_pixel(40, 30, GREY)
            .save(dir.path().join("resources/bg.png"))
            .unwrap();
        let config = ProjectConfig::new(dir.path());
        (dir, config)
    }

    fn piece(id: &str, image: &str, promoted: bool, rotated: bool) -> PieceSpec {
        PieceSpec::new(id, image, 16, Point::new(10, 6), '*', promoted, rotated).unwrap()
    }

    fn load(path: &Path) -> RgbaImage {
        image::open(path).unwrap().to_rgba8()
    }

    #[test]
    fn test_generate_all_writes_every_piece() {
        let (_dir, config) = project();
        let printer = Printer::quiet();
        let catalog = Catalog::new(vec![
            piece("a_sente", "resources/bg.png", false, false),
            piece("a_gote", "resources/bg.png", false, true),
        ])
        .unwrap();

        let report = Generator::new(&config, BlockFontLoader, &printer)
            .generate_all(&catalog)
            .unwrap();

        assert!(report.is_success());
        assert_eq!(report.generated, vec!["a_sente", "a_gote"]);
        for id in ["a_sente", "a_gote"] {
            let image = load(&config.output.join(format!("{id}.png")));
            assert_eq!(image.dimensions(), (40, 30));
            assert_eq!(*image.get_pixel(0, 0), GREY);
            assert_eq!(*image.get_pixel(39, 29), GREY);
        }
    }

    #[test]
    fn test_missing_background_skips_only_that_piece() {
        let (_dir, config) = project();
        let printer = Printer::quiet();
        let catalog = Catalog::new(vec![
            piece("missing", "resources/nope.png", false, false),
            piece("present", "resources/bg.png", false, false),
        ])
        .unwrap();

        let report = Generator::new(&config, BlockFontLoader, &printer)
            .generate_all(&catalog)
            .unwrap();

        assert_eq!(report.generated, vec!["present"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "missing");
        assert!(matches!(report.failed[0].1, KomaError::AssetLoad { .. }));
        assert!(!config.output.join("missing.png").exists());
        assert!(config.output.join("present.png").exists());
    }

    #[test]
    fn test_missing_font_skips_every_piece() {
        let (dir, config) = project();
        let printer = Printer::quiet();
        let catalog = Catalog::new(vec![piece("a", "resources/bg.png", false, false)]).unwrap();
        let fonts = TrueTypeFontLoader::new(dir.path().join("fonts/missing.ttf"));

        let report = Generator::new(&config, fonts, &printer)
            .generate_all(&catalog)
            .unwrap();

        assert!(report.generated.is_empty());
        assert!(matches!(report.failed[0].1, KomaError::FontLoad { .. }));
        // The output directory is still created up front.
        assert!(config.output.is_dir());
    }

    #[test]
    fn test_rotated_is_point_reflection_of_unrotated() {
        let (_dir, config) = project();
        let printer = Printer::quiet();
        let generator = Generator::new(&config, BlockFontLoader, &printer);
        ensure_output_dir(&config.output, &printer).unwrap();

        let upright = generator
            .generate_piece(&piece("up", "resources/bg.png", false, false))
            .unwrap();
        let turned = generator
            .generate_piece(&piece("down", "resources/bg.png", false, true))
            .unwrap();

        let upright = load(&upright);
        let turned = load(&turned);
        assert_ne!(upright, turned);
        assert_eq!(imageops::rotate180(&upright), turned);
        for (x, y, pixel) in turned.enumerate_pixels() {
            assert_eq!(pixel, upright.get_pixel(39 - x, 29 - y));
        }
    }

    #[test]
    fn test_fill_follows_promotion() {
        let (_dir, mut config) = project();
        config.style = EngraveStyle {
            shadow: LayerStyle {
                blur: 0.0,
                ..EngraveStyle::default().shadow
            },
            highlight: LayerStyle {
                colour: Colour::BLACK,
                offset: Offset::new(-1, -1),
                blur: 0.0,
            },
            ..EngraveStyle::default()
        };
        let printer = Printer::quiet();
        let generator = Generator::new(&config, BlockFontLoader, &printer);
        ensure_output_dir(&config.output, &printer).unwrap();

        let regular = load(
            &generator
                .generate_piece(&piece("regular", "resources/bg.png", false, false))
                .unwrap(),
        );
        let promoted = load(
            &generator
                .generate_piece(&piece("promoted", "resources/bg.png", true, false))
                .unwrap(),
        );

        // The 8x8 block spans x 10..=17; its right column is not highlighted.
        assert_eq!(regular.get_pixel(17, 9).0, [40, 25, 15, 255]);
        assert_eq!(promoted.get_pixel(17, 9).0, [200, 30, 30, 255]);
    }

    #[test]
    fn test_write_failure_aborts_batch() {
        let (dir, mut config) = project();
        // A regular file where the output directory should be.
        let blocked = dir.path().join("blocked");
        fs::write(&blocked, b"").unwrap();
        config.output = blocked;
        let printer = Printer::quiet();
        let catalog = Catalog::new(vec![piece("a", "resources/bg.png", false, false)]).unwrap();

        let err = Generator::new(&config, BlockFontLoader, &printer)
            .generate_all(&catalog)
            .unwrap_err();
        assert!(matches!(err, KomaError::Io { .. }));
    }

    #[test]
    fn test_ensure_output_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("build").join("pieces");
        ensure_output_dir(&out, &Printer::quiet()).unwrap();
        assert!(out.is_dir());
        // Idempotent.
        ensure_output_dir(&out, &Printer::quiet()).unwrap();
    }

    #[test]
    fn test_output_overwrites_previous_run() {
        let (_dir, config) = project();
        let printer = Printer::quiet();
        ensure_output_dir(&config.output, &printer).unwrap();
        let stale = config.output.join("a.png");
        RgbaImage::from_pixel(2, 2, GREY).save(&stale).unwrap();

        Generator::new(&config, BlockFontLoader, &printer)
            .generate_piece(&piece("a", "resources/bg.png", false, false))
            .unwrap();

        assert_eq!(load(&stale).dimensions(), (40, 30));
    }
}
