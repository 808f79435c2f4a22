/// Font rasterization into palette tiles for mosaicii.
///
/// Renders each character of a charset as a fixed-size RGBA tile
/// (white glyph on opaque black) so the matching engine can treat
/// glyphs and arbitrary sprites uniformly.

pub mod render;

pub use render::GlyphRenderer;
