use crate::luminance;

/// Rectangular RGBA pixel buffer, row-major, 4 bytes per pixel.
///
/// Used for the source image, for individual tiles, and for the
/// composed output canvas. Never resized after creation.
///
/// # Example
/// ```
/// use mo_core::frame::PixelBuffer;
/// let buf = PixelBuffer::new(10, 10);
/// assert_eq!(buf.data.len(), 400);
/// ```
#[derive(Clone)]
pub struct PixelBuffer {
    /// RGBA pixels, row-major, 4 bytes per pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelBuffer {
    /// Create a zeroed buffer with the given dimensions.
    ///
    /// # Example
    /// ```
    /// use mo_core::frame::PixelBuffer;
    /// let buf = PixelBuffer::new(100, 50);
    /// assert_eq!(buf.width, 100);
    /// assert_eq!(buf.height, 50);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; (width as usize) * (height as usize) * 4],
            width,
            height,
        }
    }

    /// Wrap an existing RGBA byte vector.
    ///
    /// Returns `None` if `data` is not exactly `width * height * 4` bytes.
    #[must_use]
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Pixel at (x, y) as (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use mo_core::frame::PixelBuffer;
    /// let buf = PixelBuffer::new(10, 10);
    /// assert_eq!(buf.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = ((y * self.width + x) * 4) as usize;
        if idx + 3 >= self.data.len() {
            return (0, 0, 0, 0);
        }
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }

    /// Write the pixel at (x, y). Out-of-bounds writes are ignored.
    #[inline(always)]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        self.data[idx] = rgba.0;
        self.data[idx + 1] = rgba.1;
        self.data[idx + 2] = rgba.2;
        self.data[idx + 3] = rgba.3;
    }

    /// Alpha-scaled BT.709 gray of the pixel at (x, y).
    ///
    /// # Example
    /// ```
    /// use mo_core::frame::PixelBuffer;
    /// let mut buf = PixelBuffer::new(1, 1);
    /// buf.set_pixel(0, 0, (255, 255, 255, 255));
    /// assert!((buf.gray(0, 0) - 255.0).abs() < 1e-9);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn gray(&self, x: u32, y: u32) -> f64 {
        let (r, g, b, a) = self.pixel(x, y);
        luminance::gray(r, g, b, a)
    }

    /// Number of pixels in the buffer.
    #[inline]
    #[must_use]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}
