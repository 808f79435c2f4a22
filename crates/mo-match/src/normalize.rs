/// Affine remap from source brightness terms into palette brightness
/// terms. Derived once per run, applied to every sample.
///
/// `remapped = (palette_max - palette_min) / (source_max - source_min)
///             * (raw - source_min) + palette_min`
///
/// A constant-brightness source makes the divisor zero; that case is
/// detected at construction and every sample then remaps to the
/// midpoint of the palette range instead.
///
/// # Example
/// ```
/// use mo_match::normalize::GrayRemap;
/// // Source [0, 100] onto palette [50, 250]:
/// let remap = GrayRemap::new(50.0, 250.0, 0.0, 100.0);
/// assert!((remap.apply(0.0) - 50.0).abs() < 1e-12);
/// assert!((remap.apply(50.0) - 150.0).abs() < 1e-12);
/// assert!((remap.apply(100.0) - 250.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GrayRemap {
    scale: f64,
    source_min: f64,
    palette_min: f64,
    /// Substitute for every sample when the source range is one point.
    fallback: Option<f64>,
}

impl GrayRemap {
    /// Derive the transform from the palette and source ranges.
    ///
    /// Requires `palette_min <= palette_max` and
    /// `source_min <= source_max` (both come from sorted data).
    #[must_use]
    pub fn new(palette_min: f64, palette_max: f64, source_min: f64, source_max: f64) -> Self {
        let span = source_max - source_min;
        if span.abs() <= f64::EPSILON {
            log::debug!(
                "constant-brightness source (gray {source_min:.2}); remapping everything to the palette midpoint"
            );
            return Self {
                scale: 0.0,
                source_min,
                palette_min,
                fallback: Some((palette_min + palette_max) / 2.0),
            };
        }
        Self {
            scale: (palette_max - palette_min) / span,
            source_min,
            palette_min,
            fallback: None,
        }
    }

    /// Remap one raw source gray into palette terms.
    #[inline(always)]
    #[must_use]
    pub fn apply(&self, raw: f64) -> f64 {
        if let Some(v) = self.fallback {
            return v;
        }
        self.scale * (raw - self.source_min) + self.palette_min
    }

    /// True when the source range collapsed to a single point.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.fallback.is_some()
    }
}
