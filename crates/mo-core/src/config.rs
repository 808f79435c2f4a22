use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::charset::CharSet;

/// Matching strategy for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// One average brightness per tile, 1-D sorted search.
    Scalar,
    /// Per-tile brightness grid, ordered by the signed-sum relation.
    Grid,
}

/// Configuration for one conversion run.
///
/// Serializable to TOML. Every field has a sane default; CLI flags
/// override individual fields after loading.
///
/// # Example
/// ```
/// use mo_core::config::RunConfig;
/// let config = RunConfig::default();
/// assert_eq!(config.columns, 80);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct RunConfig {
    /// Matching strategy.
    pub strategy: Strategy,
    /// Built-in character set used when no chars file is given.
    pub charset: CharSet,
    /// Output width in characters.
    pub columns: u32,
    /// Output height in characters. 0 = derive from the source aspect ratio.
    pub rows: u32,
    /// Font pixel size for glyph rasterization.
    pub font_px: f32,
    /// Emit text instead of a composed image.
    pub text_output: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Scalar,
            charset: CharSet::Ascii,
            columns: 80,
            rows: 0,
            font_px: 12.0,
            text_output: false,
        }
    }
}

impl RunConfig {
    /// Load a configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("invalid TOML in {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject configurations no run can satisfy.
    ///
    /// # Errors
    /// Returns `CoreError::Config` when columns is zero or the font size
    /// is not positive.
    pub fn validate(&self) -> Result<(), crate::error::CoreError> {
        if self.columns == 0 {
            return Err(crate::error::CoreError::Config(
                "columns must be at least 1".into(),
            ));
        }
        if self.font_px <= 0.0 {
            return Err(crate::error::CoreError::Config(
                "font_px must be positive".into(),
            ));
        }
        Ok(())
    }
}
