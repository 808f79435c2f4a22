use mo_core::error::CoreError;
use mo_core::frame::PixelBuffer;
use mo_core::luminance;

use crate::locate;
use crate::normalize::GrayRemap;
use crate::palette::{GRID_ASPECT, GRID_CELLS, GridPalette, ScalarPalette};

/// One matched output cell: grid coordinate plus chosen tile index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Column, 0-based.
    pub x: u32,
    /// Row, 0-based.
    pub y: u32,
    /// Index into the caller's original tile list.
    pub tile: usize,
}

/// A matching session: owns the frozen palette index, the remap, and
/// the sampled source, and answers per-cell picks.
///
/// Picks are independent of each other; [`TilePicker::cells`] yields
/// them lazily in row-major order and can be restarted at will.
pub trait TilePicker {
    /// Output width in cells.
    fn columns(&self) -> u32;

    /// Output height in cells.
    fn rows(&self) -> u32;

    /// Tile index (into the caller's tile list) for the cell at (x, y).
    ///
    /// Always a valid index once the session is constructed; per-cell
    /// matching cannot fail.
    fn pick(&self, x: u32, y: u32) -> usize;

    /// Lazy row-major pass over every cell, each visited exactly once.
    ///
    /// # Example
    /// ```
    /// use mo_core::frame::PixelBuffer;
    /// use mo_match::picker::{ScalarPicker, TilePicker};
    /// let tiles = vec![PixelBuffer::new(2, 2)];
    /// let source = PixelBuffer::new(4, 3);
    /// let picker = ScalarPicker::new(source, &tiles, 4, 3).unwrap();
    /// assert_eq!(picker.cells().count(), 12);
    /// ```
    fn cells(&self) -> Cells<'_, Self>
    where
        Self: Sized,
    {
        Cells {
            picker: self,
            x: 0,
            y: 0,
        }
    }
}

/// Row-major cell iterator over a picker. See [`TilePicker::cells`].
pub struct Cells<'a, P: TilePicker> {
    picker: &'a P,
    x: u32,
    y: u32,
}

impl<P: TilePicker> Iterator for Cells<'_, P> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.y >= self.picker.rows() || self.picker.columns() == 0 {
            return None;
        }
        let cell = Cell {
            x: self.x,
            y: self.y,
            tile: self.picker.pick(self.x, self.y),
        };
        self.x += 1;
        if self.x == self.picker.columns() {
            self.x = 0;
            self.y += 1;
        }
        Some(cell)
    }
}

/// Scalar matching session: one average gray per tile, one source
/// pixel per cell.
///
/// `source` must already be resized to exactly `columns × rows` pixels
/// by the caller (see mo-source); this type does no resampling.
pub struct ScalarPicker {
    palette: ScalarPalette,
    remap: GrayRemap,
    source: PixelBuffer,
    columns: u32,
    rows: u32,
}

impl ScalarPicker {
    /// Build the palette index, compute both ranges, and freeze the
    /// session.
    ///
    /// # Errors
    /// `EmptyPalette` / `DegenerateTile` from the palette build,
    /// `Config` for a zero-cell output grid, and `InvalidDimensions`
    /// when `source` is not `columns × rows`. All are raised before any
    /// cell is matched.
    pub fn new(
        source: PixelBuffer,
        tiles: &[PixelBuffer],
        columns: u32,
        rows: u32,
    ) -> Result<Self, CoreError> {
        if columns == 0 || rows == 0 {
            return Err(CoreError::Config("output grid must be at least 1×1".into()));
        }
        if source.width != columns || source.height != rows {
            return Err(CoreError::InvalidDimensions {
                width: source.width,
                height: source.height,
                expected_width: columns,
                expected_height: rows,
            });
        }
        let palette = ScalarPalette::build(tiles)?;
        let (source_min, source_max) = luminance::gray_range(&source)
            .ok_or_else(|| CoreError::Config("source buffer has no pixels".into()))?;
        log::debug!("source gray in [{source_min:.2}, {source_max:.2}]");
        let remap = GrayRemap::new(
            palette.min_gray(),
            palette.max_gray(),
            source_min,
            source_max,
        );
        Ok(Self {
            palette,
            remap,
            source,
            columns,
            rows,
        })
    }
}

impl TilePicker for ScalarPicker {
    fn columns(&self) -> u32 {
        self.columns
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn pick(&self, x: u32, y: u32) -> usize {
        let target = self.remap.apply(self.source.gray(x, y));
        let idx = locate::nearest_scalar(self.palette.grays(), target);
        debug_assert!(idx < self.palette.len(), "locator out of range");
        self.palette.entry(idx).tile
    }
}

/// Grid matching session: a 2×2 gray pattern per tile, a 2×2 source
/// block per cell.
///
/// `source` must already be resized to
/// `columns·GRID_ASPECT × rows·GRID_ASPECT` pixels by the caller.
pub struct GridPicker {
    palette: GridPalette,
    remap: GrayRemap,
    source: PixelBuffer,
    columns: u32,
    rows: u32,
}

impl GridPicker {
    /// Build the palette index, compute both ranges, and freeze the
    /// session.
    ///
    /// # Errors
    /// Same failure modes as [`ScalarPicker::new`], with the source
    /// expected at grid granularity.
    pub fn new(
        source: PixelBuffer,
        tiles: &[PixelBuffer],
        columns: u32,
        rows: u32,
    ) -> Result<Self, CoreError> {
        if columns == 0 || rows == 0 {
            return Err(CoreError::Config("output grid must be at least 1×1".into()));
        }
        let expected_width = columns * GRID_ASPECT;
        let expected_height = rows * GRID_ASPECT;
        if source.width != expected_width || source.height != expected_height {
            return Err(CoreError::InvalidDimensions {
                width: source.width,
                height: source.height,
                expected_width,
                expected_height,
            });
        }
        let palette = GridPalette::build(tiles)?;
        let (source_min, source_max) = luminance::gray_range(&source)
            .ok_or_else(|| CoreError::Config("source buffer has no pixels".into()))?;
        log::debug!("source gray in [{source_min:.2}, {source_max:.2}]");
        let remap = GrayRemap::new(
            palette.min_gray(),
            palette.max_gray(),
            source_min,
            source_max,
        );
        Ok(Self {
            palette,
            remap,
            source,
            columns,
            rows,
        })
    }

    /// Remapped 2×2 gray block co-located with cell (x, y).
    ///
    /// Normalization is applied per cell value here rather than to the
    /// source pixels up front; the two orderings are algebraically
    /// equivalent and this one skips a quantization pass.
    fn chunk(&self, x: u32, y: u32) -> [f64; GRID_CELLS] {
        let mut grid = [0.0f64; GRID_CELLS];
        let base_x = x * GRID_ASPECT;
        let base_y = y * GRID_ASPECT;
        for dy in 0..GRID_ASPECT {
            for dx in 0..GRID_ASPECT {
                let raw = self.source.gray(base_x + dx, base_y + dy);
                grid[(dy * GRID_ASPECT + dx) as usize] = self.remap.apply(raw);
            }
        }
        grid
    }
}

impl TilePicker for GridPicker {
    fn columns(&self) -> u32 {
        self.columns
    }

    fn rows(&self) -> u32 {
        self.rows
    }

    fn pick(&self, x: u32, y: u32) -> usize {
        let target = self.chunk(x, y);
        let idx = locate::nearest_grid(self.palette.grids(), &target);
        debug_assert!(idx < self.palette.len(), "locator out of range");
        self.palette.entry(idx).tile
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, level: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set_pixel(x, y, (level, level, level, 255));
            }
        }
        buf
    }

    fn gradient_tiles() -> Vec<PixelBuffer> {
        vec![solid(2, 2, 0), solid(2, 2, 128), solid(2, 2, 255)]
    }

    #[test]
    fn scalar_picks_dark_and_bright_extremes() {
        let mut source = PixelBuffer::new(2, 1);
        source.set_pixel(0, 0, (0, 0, 0, 255));
        source.set_pixel(1, 0, (255, 255, 255, 255));
        let picker = ScalarPicker::new(source, &gradient_tiles(), 2, 1).unwrap();
        assert_eq!(picker.pick(0, 0), 0);
        assert_eq!(picker.pick(1, 0), 2);
    }

    #[test]
    fn scalar_rejects_mismatched_source() {
        let source = PixelBuffer::new(3, 1);
        assert!(matches!(
            ScalarPicker::new(source, &gradient_tiles(), 2, 1),
            Err(CoreError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn empty_tile_list_aborts_before_matching() {
        let source = PixelBuffer::new(2, 1);
        assert!(matches!(
            ScalarPicker::new(source, &[], 2, 1),
            Err(CoreError::EmptyPalette)
        ));
    }

    #[test]
    fn constant_source_matches_without_dividing() {
        let source = solid(4, 4, 90);
        let picker = ScalarPicker::new(source, &gradient_tiles(), 4, 4).unwrap();
        let first = picker.pick(0, 0);
        for cell in picker.cells() {
            assert_eq!(cell.tile, first);
        }
    }

    #[test]
    fn cells_visit_row_major_exactly_once() {
        let source = PixelBuffer::new(3, 2);
        let picker = ScalarPicker::new(source, &gradient_tiles(), 3, 2).unwrap();
        let coords: Vec<(u32, u32)> = picker.cells().map(|c| (c.x, c.y)).collect();
        assert_eq!(
            coords,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
    }

    #[test]
    fn cells_is_restartable() {
        let source = PixelBuffer::new(2, 2);
        let picker = ScalarPicker::new(source, &gradient_tiles(), 2, 2).unwrap();
        let a: Vec<Cell> = picker.cells().collect();
        let b: Vec<Cell> = picker.cells().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn grid_picker_separates_checker_from_flat() {
        // Source cell is a black/white checker; palette has a flat tile
        // and a bright tile. The signed-sum relation lands the checker
        // (half-bright) between the two and rounds up.
        let mut source = PixelBuffer::new(2, 2);
        source.set_pixel(1, 0, (255, 255, 255, 255));
        source.set_pixel(0, 1, (255, 255, 255, 255));
        let tiles = vec![solid(2, 2, 0), solid(2, 2, 255)];
        let picker = GridPicker::new(source, &tiles, 1, 1).unwrap();
        assert_eq!(picker.pick(0, 0), 1);
    }

    #[test]
    fn grid_picker_validates_grid_granularity() {
        let source = PixelBuffer::new(2, 1);
        let tiles = vec![solid(2, 2, 0)];
        assert!(matches!(
            GridPicker::new(source, &tiles, 1, 1),
            Err(CoreError::InvalidDimensions {
                expected_width: 2,
                expected_height: 2,
                ..
            })
        ));
    }

    #[test]
    fn grid_constant_source_uses_palette_midpoint() {
        let source = solid(2, 2, 200);
        let tiles = vec![solid(2, 2, 0), solid(2, 2, 200)];
        let picker = GridPicker::new(source, &tiles, 1, 1).unwrap();
        // Midpoint of [0, 200] is 100 per cell: sum 400 sits between the
        // entries (0 and 800) and the grid rule rounds up.
        assert_eq!(picker.pick(0, 0), 1);
    }

    #[test]
    fn grid_cells_cover_every_cell() {
        let source = PixelBuffer::new(6, 4);
        let tiles = vec![solid(2, 2, 0), solid(2, 2, 255)];
        let picker = GridPicker::new(source, &tiles, 3, 2).unwrap();
        assert_eq!(picker.cells().count(), 6);
    }
}
