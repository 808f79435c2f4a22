use std::path::PathBuf;

use clap::Parser;

/// mosaicii — render an image as a mosaic of glyph tiles.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Source image (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: PathBuf,

    /// Font file used to rasterize the tile palette (TTF/OTF).
    #[arg(long)]
    pub font: PathBuf,

    /// Output path. Default: mosaicii-<timestamp>.png or .txt.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Configuration TOML. CLI flags override individual fields.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Built-in character set: "ascii" or "cp437".
    #[arg(long)]
    pub charset: Option<String>,

    /// UTF-8 text file whose unique characters form the palette
    /// (takes precedence over --charset).
    #[arg(long)]
    pub chars_file: Option<PathBuf>,

    /// Output width in characters.
    #[arg(long)]
    pub columns: Option<u32>,

    /// Output height in characters. Derived from the source aspect
    /// ratio when omitted.
    #[arg(long)]
    pub rows: Option<u32>,

    /// Font pixel size for tile rasterization.
    #[arg(long)]
    pub font_px: Option<f32>,

    /// Match on 2×2 brightness patterns instead of per-tile averages.
    #[arg(long, default_value_t = false)]
    pub grid: bool,

    /// Write text (one character per cell) instead of a composed image.
    #[arg(long, default_value_t = false)]
    pub text: bool,

    /// Log level: error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Reject flag values no run can satisfy, before any file is read.
    ///
    /// Deeper checks (charset names, config files) happen once the
    /// configuration is resolved; `--rows 0` stays legal and means
    /// "derive from the source aspect ratio".
    ///
    /// # Errors
    /// Returns an error for a zero column count or a non-positive font
    /// size.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.columns == Some(0) {
            anyhow::bail!("--columns must be at least 1");
        }
        if let Some(px) = self.font_px {
            if px <= 0.0 {
                anyhow::bail!("--font-px must be positive");
            }
        }
        Ok(())
    }
}
