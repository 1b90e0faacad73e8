//! Image encoding for export.
//!
//! Export is always a lossless PNG. The `quality` knob a canvas accepts
//! (`0.0..=1.0`) maps onto PNG compression effort; 1.0 selects the best
//! compression. Pixel values are identical at every quality.

mod png;

pub use png::{encode_png, png_compression_for_quality, EncodeError, ExportFormat};
