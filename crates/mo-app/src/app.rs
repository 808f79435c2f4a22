use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail, ensure};
use mo_core::charset::{CharSet, unique_chars};
use mo_core::config::{RunConfig, Strategy};
use mo_core::frame::PixelBuffer;
use mo_glyph::GlyphRenderer;
use mo_match::palette::GRID_ASPECT;
use mo_match::picker::{GridPicker, ScalarPicker, TilePicker};
use mo_source::image::{load_image, save_png};
use mo_source::resize::resize_to;

use crate::cli::Cli;
use crate::compose::{compose_image, compose_text};

/// Run one conversion end to end: palette build, source sampling,
/// per-cell matching, output composition.
///
/// # Errors
/// Fails on unreadable inputs, invalid configuration, or an unbuildable
/// palette — always before any output file is touched.
pub fn run(cli: &Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    apply_overrides(&mut config, cli)?;
    config.validate()?;

    let chars = select_chars(cli, &config)?;
    ensure!(!chars.is_empty(), "character palette is empty");
    log::info!("palette: {} characters", chars.len());

    let font_data =
        fs::read(&cli.font).with_context(|| format!("cannot read font {}", cli.font.display()))?;
    let renderer = GlyphRenderer::new(font_data, config.font_px)?;
    let tiles = renderer.render_set(&chars);
    let (tile_w, tile_h) = renderer.tile_size();

    let source = load_image(&cli.image)?;
    let columns = config.columns;
    let rows = if config.rows > 0 {
        config.rows
    } else {
        derive_rows(&source, columns, tile_w, tile_h)
    };
    log::info!("output grid: {columns}×{rows} cells of {tile_w}×{tile_h} px");

    match config.strategy {
        Strategy::Scalar => {
            let sampled = resize_to(&source, columns, rows)?;
            let picker = ScalarPicker::new(sampled, &tiles, columns, rows)?;
            emit(cli, &config, &picker, &tiles, &chars)
        }
        Strategy::Grid => {
            let sampled = resize_to(&source, columns * GRID_ASPECT, rows * GRID_ASPECT)?;
            let picker = GridPicker::new(sampled, &tiles, columns, rows)?;
            emit(cli, &config, &picker, &tiles, &chars)
        }
    }
}

/// Write the chosen rendition of a finished matching session.
fn emit<P: TilePicker + Sync>(
    cli: &Cli,
    config: &RunConfig,
    picker: &P,
    tiles: &[PixelBuffer],
    chars: &[char],
) -> Result<()> {
    let path = output_path(cli, config);
    if config.text_output {
        let text = compose_text(picker, chars)?;
        fs::write(&path, text).with_context(|| format!("cannot write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    } else {
        let canvas = compose_image(picker, tiles)?;
        save_png(&canvas, &path)?;
    }
    Ok(())
}

fn apply_overrides(config: &mut RunConfig, cli: &Cli) -> Result<()> {
    if let Some(name) = &cli.charset {
        config.charset = match name.to_lowercase().as_str() {
            "ascii" => CharSet::Ascii,
            "cp437" | "codepage437" => CharSet::CodePage437,
            other => bail!("unknown character set '{other}' (expected ascii or cp437)"),
        };
    }
    if let Some(columns) = cli.columns {
        config.columns = columns;
    }
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(font_px) = cli.font_px {
        config.font_px = font_px;
    }
    if cli.grid {
        config.strategy = Strategy::Grid;
    }
    if cli.text {
        config.text_output = true;
    }
    Ok(())
}

fn select_chars(cli: &Cli, config: &RunConfig) -> Result<Vec<char>> {
    if let Some(path) = &cli.chars_file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("cannot read chars file {}", path.display()))?;
        return Ok(unique_chars(&text));
    }
    Ok(config.charset.chars())
}

/// Rows that keep the mosaic's aspect close to the source's, given the
/// pixel dimensions of one cell.
fn derive_rows(source: &PixelBuffer, columns: u32, tile_w: u32, tile_h: u32) -> u32 {
    let source_aspect = f64::from(source.height) / f64::from(source.width.max(1));
    let cell_aspect = f64::from(tile_w) / f64::from(tile_h.max(1));
    let rows = f64::from(columns) * source_aspect * cell_aspect;
    (rows.round() as u32).max(1)
}

/// Resolve the output path: explicit `--out` (suffix appended if it
/// does not match the mode) or a timestamped default.
fn output_path(cli: &Cli, config: &RunConfig) -> PathBuf {
    let suffix = if config.text_output { "txt" } else { "png" };
    match &cli.out {
        Some(path) => {
            if path.extension().and_then(|e| e.to_str()) == Some(suffix) {
                path.clone()
            } else {
                let mut name = path.as_os_str().to_owned();
                name.push(format!(".{suffix}"));
                PathBuf::from(name)
            }
        }
        None => {
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            PathBuf::from(format!("mosaicii-{stamp}.{suffix}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(extra: &[&str]) -> Cli {
        let mut args = vec!["mosaicii", "--image", "a.png", "--font", "f.ttf"];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    #[test]
    fn overrides_replace_config_fields() {
        let mut config = RunConfig::default();
        apply_overrides(
            &mut config,
            &cli(&["--grid", "--text", "--columns", "40", "--charset", "cp437"]),
        )
        .unwrap();
        assert_eq!(config.strategy, Strategy::Grid);
        assert!(config.text_output);
        assert_eq!(config.columns, 40);
        assert_eq!(config.charset, CharSet::CodePage437);
    }

    #[test]
    fn unknown_charset_name_is_an_error() {
        let mut config = RunConfig::default();
        assert!(apply_overrides(&mut config, &cli(&["--charset", "ebcdic"])).is_err());
    }

    #[test]
    fn grid_flag_absent_keeps_config_strategy() {
        let mut config = RunConfig {
            strategy: Strategy::Grid,
            ..RunConfig::default()
        };
        apply_overrides(&mut config, &cli(&[])).unwrap();
        assert_eq!(config.strategy, Strategy::Grid);
    }

    #[test]
    fn derive_rows_follows_source_aspect() {
        // Square source, square cells: rows == columns.
        let source = PixelBuffer::new(100, 100);
        assert_eq!(derive_rows(&source, 80, 8, 8), 80);
        // Tall cells halve the row count.
        assert_eq!(derive_rows(&source, 80, 8, 16), 40);
        // Wide source shrinks it further.
        let wide = PixelBuffer::new(200, 100);
        assert_eq!(derive_rows(&wide, 80, 8, 16), 20);
    }

    #[test]
    fn derive_rows_never_returns_zero() {
        let flat = PixelBuffer::new(10_000, 1);
        assert_eq!(derive_rows(&flat, 10, 1, 100), 1);
    }

    #[test]
    fn output_path_appends_matching_suffix() {
        let config = RunConfig::default();
        let with_out = cli(&["--out", "result"]);
        assert_eq!(
            output_path(&with_out, &config),
            PathBuf::from("result.png")
        );
        let keeps = cli(&["--out", "result.png"]);
        assert_eq!(output_path(&keeps, &config), PathBuf::from("result.png"));
    }

    #[test]
    fn output_path_uses_txt_in_text_mode() {
        let config = RunConfig {
            text_output: true,
            ..RunConfig::default()
        };
        let with_out = cli(&["--out", "art.png"]);
        assert_eq!(
            output_path(&with_out, &config),
            PathBuf::from("art.png.txt")
        );
    }
}
