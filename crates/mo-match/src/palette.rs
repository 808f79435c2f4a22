use mo_core::error::CoreError;
use mo_core::frame::PixelBuffer;
use mo_core::luminance;

use crate::locate;

/// Side length of the brightness grid each tile is reduced to.
pub const GRID_ASPECT: u32 = 2;
/// Cell count of one brightness grid, row-major.
pub const GRID_CELLS: usize = (GRID_ASPECT * GRID_ASPECT) as usize;

/// One tile in a scalar palette: original position plus average gray.
#[derive(Clone, Copy, Debug)]
pub struct ScalarEntry {
    /// Index of the tile in the caller's tile list.
    pub tile: usize,
    /// Average gray of the tile, in [0, 255].
    pub gray: f64,
}

/// Sorted scalar brightness index over a tile palette.
///
/// Built once per run, read-only afterwards. Entries are sorted
/// ascending by gray; ties keep the original tile order (stable sort),
/// so rebuilding from the same tile list always yields the same index.
pub struct ScalarPalette {
    entries: Vec<ScalarEntry>,
    /// Gray of each entry, same order as `entries`. The search key.
    grays: Vec<f64>,
}

impl ScalarPalette {
    /// Reduce every tile to its average gray and sort.
    ///
    /// # Errors
    /// `EmptyPalette` if `tiles` is empty; `DegenerateTile` if any tile
    /// has zero area. Both abort the run before any matching starts —
    /// silently skipping a tile would change the available set behind
    /// the caller's back.
    pub fn build(tiles: &[PixelBuffer]) -> Result<Self, CoreError> {
        if tiles.is_empty() {
            return Err(CoreError::EmptyPalette);
        }
        let mut entries = Vec::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            let gray = luminance::average_gray(tile).ok_or(CoreError::DegenerateTile {
                index: i,
                width: tile.width,
                height: tile.height,
            })?;
            entries.push(ScalarEntry { tile: i, gray });
        }
        entries.sort_by(|a, b| a.gray.total_cmp(&b.gray));
        let grays = entries.iter().map(|e| e.gray).collect();
        let palette = Self { entries, grays };
        log::debug!(
            "scalar palette: {} tiles, gray in [{:.2}, {:.2}]",
            palette.len(),
            palette.min_gray(),
            palette.max_gray()
        );
        Ok(palette)
    }

    /// Number of entries. Always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty palettes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted grays, the binary-search key sequence.
    #[must_use]
    pub fn grays(&self) -> &[f64] {
        &self.grays
    }

    /// Entry at a sorted position.
    #[must_use]
    pub fn entry(&self, sorted_index: usize) -> &ScalarEntry {
        &self.entries[sorted_index]
    }

    /// Gray of the darkest tile.
    #[must_use]
    pub fn min_gray(&self) -> f64 {
        self.grays[0]
    }

    /// Gray of the brightest tile.
    #[must_use]
    pub fn max_gray(&self) -> f64 {
        self.grays[self.grays.len() - 1]
    }
}

/// One tile in a grid palette: original position plus its 2×2 grays.
#[derive(Clone, Copy, Debug)]
pub struct GridEntry {
    /// Index of the tile in the caller's tile list.
    pub tile: usize,
    /// Per-cell average grays, row-major.
    pub grid: [f64; GRID_CELLS],
}

/// Sorted grid brightness index over a tile palette.
///
/// Ordered by the signed-sum relation of [`locate::grid_cmp`]; see
/// there for why that relation is kept as-is. Stable sort, so equal
/// sums keep the original tile order.
pub struct GridPalette {
    entries: Vec<GridEntry>,
    /// Grid of each entry, same order as `entries`. The search key.
    grids: Vec<[f64; GRID_CELLS]>,
    min_gray: f64,
    max_gray: f64,
}

impl GridPalette {
    /// Reduce every tile to a 2×2 gray grid and sort.
    ///
    /// # Errors
    /// Same failure modes as [`ScalarPalette::build`].
    pub fn build(tiles: &[PixelBuffer]) -> Result<Self, CoreError> {
        if tiles.is_empty() {
            return Err(CoreError::EmptyPalette);
        }
        let mut entries = Vec::with_capacity(tiles.len());
        for (i, tile) in tiles.iter().enumerate() {
            let grid = tile_grid(tile).ok_or(CoreError::DegenerateTile {
                index: i,
                width: tile.width,
                height: tile.height,
            })?;
            entries.push(GridEntry { tile: i, grid });
        }
        entries.sort_by(|a, b| locate::grid_cmp(&a.grid, &b.grid));
        let grids: Vec<_> = entries.iter().map(|e| e.grid).collect();

        // Palette range: darkest cell of the first entry, brightest cell
        // of the last. Both slices are non-empty here.
        let min_gray = fold_min(&grids[0]);
        let max_gray = fold_max(&grids[grids.len() - 1]);
        log::debug!(
            "grid palette: {} tiles, gray in [{min_gray:.2}, {max_gray:.2}]",
            entries.len()
        );
        Ok(Self {
            entries,
            grids,
            min_gray,
            max_gray,
        })
    }

    /// Number of entries. Always ≥ 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: construction rejects empty palettes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted grids, the binary-search key sequence.
    #[must_use]
    pub fn grids(&self) -> &[[f64; GRID_CELLS]] {
        &self.grids
    }

    /// Entry at a sorted position.
    #[must_use]
    pub fn entry(&self, sorted_index: usize) -> &GridEntry {
        &self.entries[sorted_index]
    }

    /// Darkest cell gray of the first sorted entry.
    #[must_use]
    pub fn min_gray(&self) -> f64 {
        self.min_gray
    }

    /// Brightest cell gray of the last sorted entry.
    #[must_use]
    pub fn max_gray(&self) -> f64 {
        self.max_gray
    }
}

/// Reduce a tile to its 2×2 brightness grid.
///
/// The tile is partitioned into `GRID_ASPECT × GRID_ASPECT` regions and
/// each region averaged independently. Region bounds round so that
/// every region keeps at least one pixel even for 1-pixel-wide tiles.
/// Returns `None` for a zero-area tile.
fn tile_grid(tile: &PixelBuffer) -> Option<[f64; GRID_CELLS]> {
    if tile.width == 0 || tile.height == 0 {
        return None;
    }
    let mut grid = [0.0f64; GRID_CELLS];
    for gy in 0..GRID_ASPECT {
        let y0 = gy * tile.height / GRID_ASPECT;
        let y1 = ((gy + 1) * tile.height).div_ceil(GRID_ASPECT);
        for gx in 0..GRID_ASPECT {
            let x0 = gx * tile.width / GRID_ASPECT;
            let x1 = ((gx + 1) * tile.width).div_ceil(GRID_ASPECT);
            let avg = luminance::average_gray_region(tile, x0, y0, x1, y1)?;
            grid[(gy * GRID_ASPECT + gx) as usize] = avg;
        }
    }
    Some(grid)
}

fn fold_min(grid: &[f64; GRID_CELLS]) -> f64 {
    grid.iter().fold(f64::MAX, |acc, &g| acc.min(g))
}

fn fold_max(grid: &[f64; GRID_CELLS]) -> f64 {
    grid.iter().fold(f64::MIN, |acc, &g| acc.max(g))
}
