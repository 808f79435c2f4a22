/// Image decode/encode and resampling collaborators for mosaicii.
///
/// Everything here is pixel plumbing; no matching logic. The resize
/// step is what turns a source image into the one-sample-per-cell (or
/// one-block-per-cell) buffer the matching engine consumes.

pub mod image;
pub mod resize;
