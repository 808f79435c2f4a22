/// Shared types and configuration for mosaicii.
///
/// This crate contains the pixel buffer, luminance math, built-in
/// character sets, error types, and run configuration used across the
/// mosaicii workspace.

pub mod charset;
pub mod config;
pub mod error;
pub mod frame;
pub mod luminance;

pub use charset::CharSet;
pub use config::RunConfig;
pub use error::CoreError;
pub use frame::PixelBuffer;
