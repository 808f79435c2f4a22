use anyhow::{Result, ensure};
use mo_core::frame::PixelBuffer;
use mo_match::picker::TilePicker;
use rayon::prelude::*;

/// Compose the mosaic image: every cell's chosen tile blitted at its
/// grid position on a `columns·tileW × rows·tileH` canvas.
///
/// Parallelized per row band; cells are independent once the picker is
/// frozen, so bands can be filled concurrently.
///
/// # Errors
/// Returns an error if the tile list is empty or the tiles are not all
/// the same size.
pub fn compose_image<P: TilePicker + Sync>(picker: &P, tiles: &[PixelBuffer]) -> Result<PixelBuffer> {
    ensure!(!tiles.is_empty(), "no tiles to compose");
    let tile_w = tiles[0].width;
    let tile_h = tiles[0].height;
    ensure!(tile_w >= 1 && tile_h >= 1, "tiles must have pixels");
    ensure!(
        tiles.iter().all(|t| t.width == tile_w && t.height == tile_h),
        "all tiles must share the same dimensions"
    );

    let columns = picker.columns();
    let rows = picker.rows();
    let mut canvas = PixelBuffer::new(columns * tile_w, rows * tile_h);

    let stride = (columns * tile_w * 4) as usize;
    let band_size = stride * tile_h as usize;

    canvas
        .data
        .par_chunks_exact_mut(band_size)
        .enumerate()
        .for_each(|(gy, band)| {
            for gx in 0..columns {
                let tile = &tiles[picker.pick(gx, gy as u32)];
                let dst_x0 = (gx * tile_w * 4) as usize;
                for ty in 0..tile_h as usize {
                    let src_start = ty * (tile_w * 4) as usize;
                    let src_row = &tile.data[src_start..src_start + (tile_w * 4) as usize];
                    let dst_start = ty * stride + dst_x0;
                    band[dst_start..dst_start + src_row.len()].copy_from_slice(src_row);
                }
            }
        });

    Ok(canvas)
}

/// Compose the text rendition: one character per cell, one line per
/// row, in the single row-major pass of [`TilePicker::cells`].
///
/// # Errors
/// Returns an error if a picked tile index has no matching character
/// (charset and tile list out of step).
pub fn compose_text<P: TilePicker>(picker: &P, chars: &[char]) -> Result<String> {
    let columns = picker.columns() as usize;
    let rows = picker.rows() as usize;
    let mut out = String::with_capacity(rows * (columns + 1));
    for cell in picker.cells() {
        let ch = chars
            .get(cell.tile)
            .ok_or_else(|| anyhow::anyhow!("tile {} has no character", cell.tile))?;
        out.push(*ch);
        if cell.x + 1 == picker.columns() {
            out.push('\n');
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mo_match::picker::ScalarPicker;

    fn solid(w: u32, h: u32, level: u8) -> PixelBuffer {
        let mut buf = PixelBuffer::new(w, h);
        for y in 0..h {
            for x in 0..w {
                buf.set_pixel(x, y, (level, level, level, 255));
            }
        }
        buf
    }

    /// 2×1 source, black then white, against a dark/bright tile pair.
    fn contrast_picker(tile_w: u32, tile_h: u32) -> (ScalarPicker, Vec<PixelBuffer>) {
        let mut source = PixelBuffer::new(2, 1);
        source.set_pixel(0, 0, (0, 0, 0, 255));
        source.set_pixel(1, 0, (255, 255, 255, 255));
        let tiles = vec![solid(tile_w, tile_h, 0), solid(tile_w, tile_h, 255)];
        let picker = ScalarPicker::new(source, &tiles, 2, 1).unwrap();
        (picker, tiles)
    }

    #[test]
    fn text_maps_tiles_back_to_characters() {
        let (picker, _tiles) = contrast_picker(2, 2);
        let text = compose_text(&picker, &[' ', '#']).unwrap();
        assert_eq!(text, " #\n");
    }

    #[test]
    fn text_rejects_short_charset() {
        let (picker, _tiles) = contrast_picker(2, 2);
        assert!(compose_text(&picker, &[' ']).is_err());
    }

    #[test]
    fn image_blits_each_tile_at_its_cell() {
        let (picker, tiles) = contrast_picker(3, 2);
        let canvas = compose_image(&picker, &tiles).unwrap();
        assert_eq!(canvas.width, 6);
        assert_eq!(canvas.height, 2);
        // Left cell dark, right cell bright, across the full tile area.
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(canvas.pixel(x, y).0, 0);
                assert_eq!(canvas.pixel(x + 3, y).0, 255);
            }
        }
    }

    #[test]
    fn image_rejects_mixed_tile_sizes() {
        let (picker, _tiles) = contrast_picker(2, 2);
        let bad = vec![solid(2, 2, 0), solid(3, 2, 255)];
        assert!(compose_image(&picker, &bad).is_err());
    }

    #[test]
    fn image_rejects_empty_tile_list() {
        let (picker, _tiles) = contrast_picker(2, 2);
        assert!(compose_image(&picker, &[]).is_err());
    }
}
