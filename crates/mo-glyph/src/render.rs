use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};
use mo_core::frame::PixelBuffer;

/// Rasterizes characters into uniform palette tiles.
///
/// Cell metrics are derived once from the font: width from the 'M'
/// advance, height from ascent + descent + line gap. Every rendered
/// tile has the same dimensions so the palette stays a set of equally
/// sized tiles.
pub struct GlyphRenderer {
    font: FontVec,
    scale: PxScale,
    tile_width: u32,
    tile_height: u32,
}

impl GlyphRenderer {
    /// Parse a font and fix the tile cell metrics.
    ///
    /// # Errors
    /// Returns an error if the font data cannot be parsed.
    pub fn new(font_data: Vec<u8>, scale_px: f32) -> Result<Self> {
        let font = FontVec::try_from_vec(font_data).context("cannot parse font data")?;
        let scale = PxScale::from(scale_px);

        let v_advance = font.ascent_unscaled() - font.descent_unscaled() + font.line_gap_unscaled();
        let tile_height = ((v_advance * scale.y / font.height_unscaled()).ceil() as u32).max(1);

        let m_glyph = font.glyph_id('M');
        let h_advance = font.h_advance_unscaled(m_glyph);
        let tile_width = ((h_advance * scale.x / font.height_unscaled()).ceil() as u32).max(1);

        log::debug!("glyph tiles: {tile_width}×{tile_height} px at scale {scale_px}");
        Ok(Self {
            font,
            scale,
            tile_width,
            tile_height,
        })
    }

    /// Dimensions shared by every tile this renderer produces.
    #[must_use]
    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Render one character: white glyph on an opaque black tile.
    ///
    /// A character the font has no outline for (including space) yields
    /// an all-black tile, which matches as the darkest candidate.
    #[must_use]
    pub fn render(&self, ch: char) -> PixelBuffer {
        let mut tile = black_tile(self.tile_width, self.tile_height);

        let gid = self.font.glyph_id(ch);
        let ascent_px =
            self.font.ascent_unscaled() * self.scale.y / self.font.height_unscaled();
        let glyph = gid.with_scale_and_position(self.scale, point(0.0, ascent_px));

        if let Some(outline) = self.font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            let (width, height) = (self.tile_width, self.tile_height);
            #[allow(clippy::cast_possible_wrap)]
            outline.draw(|x, y, v| {
                let px = (x as i32 + bounds.min.x as i32).max(0) as u32;
                let py = (y as i32 + bounds.min.y as i32).max(0) as u32;
                if px < width && py < height {
                    let level = (v * 255.0).round() as u8;
                    let idx = ((py * width + px) * 4) as usize;
                    tile.data[idx] = level;
                    tile.data[idx + 1] = level;
                    tile.data[idx + 2] = level;
                }
            });
        }
        tile
    }

    /// Render a whole charset, one tile per character, in charset order.
    ///
    /// Characters missing from the font are kept (as black tiles) so
    /// tile indices stay aligned with the charset; each miss is logged.
    #[must_use]
    pub fn render_set(&self, chars: &[char]) -> Vec<PixelBuffer> {
        let mut tiles = Vec::with_capacity(chars.len());
        for &ch in chars {
            if self.font.glyph_id(ch).0 == 0 && ch != '\0' {
                log::warn!("font has no glyph for {ch:?}; using a blank tile");
            }
            tiles.push(self.render(ch));
        }
        tiles
    }
}

/// Opaque black RGBA tile.
fn black_tile(width: u32, height: u32) -> PixelBuffer {
    let mut tile = PixelBuffer::new(width, height);
    for chunk in tile.data.chunks_exact_mut(4) {
        chunk[3] = 255;
    }
    tile
}
