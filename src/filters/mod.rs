//! Intensity transforms for single-channel 8-bit images.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W) | u8 | Single luminance channel, 0-255 |
//!
//! ## Architecture
//!
//! Every transform reduces to a 256-entry [`lut::Lut`] applied per pixel:
//! - **Parameter-only tables** - gamma tables depend on the gamma value alone
//!   and are memoized by [`crate::cache::LutCache`]
//! - **Content-derived tables** - equalization tables come from the image's own
//!   histogram and are rebuilt on every call
//! - **Thread-safe** - table application runs in parallel with rayon
//!
//! ## Filter Categories
//!
//! - **Tonal**: gamma correction, histogram equalization

pub mod lut;
pub mod gamma;
pub mod equalize;
