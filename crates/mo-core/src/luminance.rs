use crate::frame::PixelBuffer;

/// Alpha-scaled perceptual gray of one RGBA pixel.
///
/// BT.709 weights, scaled by `a / 255` so transparent pixels read dark.
/// Result is in [0.0, 255.0]. Total over the input domain.
///
/// # Example
/// ```
/// use mo_core::luminance::gray;
/// assert_eq!(gray(0, 0, 0, 255), 0.0);
/// assert!((gray(255, 255, 255, 255) - 255.0).abs() < 1e-9);
/// assert_eq!(gray(255, 255, 255, 0), 0.0);
/// ```
#[inline(always)]
#[must_use]
pub fn gray(r: u8, g: u8, b: u8, a: u8) -> f64 {
    let l = f64::from(r) * 0.2126 + f64::from(g) * 0.7152 + f64::from(b) * 0.0722;
    l * f64::from(a) / 255.0
}

/// Min and max gray over an entire buffer. Single linear scan.
///
/// A constant-brightness buffer yields `min == max`; callers must not
/// divide by the span without checking it first.
///
/// Returns `None` for a zero-area buffer.
///
/// # Example
/// ```
/// use mo_core::frame::PixelBuffer;
/// use mo_core::luminance::gray_range;
/// let buf = PixelBuffer::new(4, 4);
/// let (min, max) = gray_range(&buf).unwrap();
/// assert_eq!(min, max);
/// ```
#[must_use]
pub fn gray_range(buf: &PixelBuffer) -> Option<(f64, f64)> {
    if buf.pixel_count() == 0 {
        return None;
    }
    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for y in 0..buf.height {
        for x in 0..buf.width {
            let g = buf.gray(x, y);
            if g < min {
                min = g;
            }
            if g > max {
                max = g;
            }
        }
    }
    Some((min, max))
}

/// Area-weighted average gray of a whole buffer.
///
/// Fixed row-major accumulation order, so identical input always yields
/// an identical value. Returns `None` for a zero-area buffer.
#[must_use]
pub fn average_gray(buf: &PixelBuffer) -> Option<f64> {
    average_gray_region(buf, 0, 0, buf.width, buf.height)
}

/// Average gray over the half-open pixel region `[x0, x1) × [y0, y1)`.
///
/// Returns `None` if the region is empty or exceeds the buffer.
#[must_use]
pub fn average_gray_region(buf: &PixelBuffer, x0: u32, y0: u32, x1: u32, y1: u32) -> Option<f64> {
    if x0 >= x1 || y0 >= y1 || x1 > buf.width || y1 > buf.height {
        return None;
    }
    let mut sum = 0.0f64;
    for y in y0..y1 {
        for x in x0..x1 {
            sum += buf.gray(x, y);
        }
    }
    let count = f64::from(x1 - x0) * f64::from(y1 - y0);
    Some(sum / count)
}
