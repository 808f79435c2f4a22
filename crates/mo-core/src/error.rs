use thiserror::Error;

/// Errors originating from the core and matching modules.
#[derive(Error, Debug)]
pub enum CoreError {
    /// No tiles were supplied to the palette builder.
    #[error("empty palette: at least one tile is required")]
    EmptyPalette,

    /// A tile could not be reduced to a brightness descriptor.
    #[error("tile {index} has no measurable pixels ({width}×{height})")]
    DegenerateTile {
        /// Position of the offending tile in the supplied list.
        index: usize,
        /// Tile width in pixels.
        width: u32,
        /// Tile height in pixels.
        height: u32,
    },

    /// A buffer did not have the dimensions the caller promised.
    #[error("invalid dimensions: got {width}×{height}, expected {expected_width}×{expected_height}")]
    InvalidDimensions {
        /// Actual width.
        width: u32,
        /// Actual height.
        height: u32,
        /// Required width.
        expected_width: u32,
        /// Required height.
        expected_height: u32,
    },

    /// Invalid configuration value or structure.
    #[error("invalid configuration: {0}")]
    Config(String),
}
