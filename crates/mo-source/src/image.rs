use std::path::Path;

use anyhow::{Context, Result};
use mo_core::frame::PixelBuffer;

/// Decode an image file into an RGBA pixel buffer.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use mo_source::image::load_image;
/// let source = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let img = ::image::open(path).with_context(|| format!("cannot load {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("loaded {} ({width}×{height})", path.display());
    PixelBuffer::from_raw(width, height, rgba.into_raw())
        .with_context(|| format!("decoded buffer size mismatch for {}", path.display()))
}

/// Encode a pixel buffer as a PNG file.
///
/// # Errors
/// Returns an error if the buffer dimensions are inconsistent or the
/// file cannot be written.
pub fn save_png(buf: &PixelBuffer, path: &Path) -> Result<()> {
    let img: ::image::RgbaImage =
        ::image::ImageBuffer::from_raw(buf.width, buf.height, buf.data.clone())
            .context("pixel buffer size does not match its dimensions")?;
    img.save(path)
        .with_context(|| format!("cannot write {}", path.display()))?;
    log::info!("wrote {} ({}×{})", path.display(), buf.width, buf.height);
    Ok(())
}
