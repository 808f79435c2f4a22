/// Brightness-indexed nearest-match engine for mosaicii.
///
/// Builds a sorted brightness index over a tile palette, remaps source
/// brightness into palette terms, and picks the closest tile for every
/// output cell. Two strategies share the pipeline: scalar (one average
/// per tile) and grid (a 2×2 brightness pattern per tile).

pub mod locate;
pub mod normalize;
pub mod palette;
pub mod picker;

pub use normalize::GrayRemap;
pub use palette::{GRID_ASPECT, GridPalette, ScalarPalette};
pub use picker::{Cell, GridPicker, ScalarPicker, TilePicker};
