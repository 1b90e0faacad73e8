//! PNG encoding for export.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during export encoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder itself failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Output format for export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
}

impl ExportFormat {
    /// MIME type of the encoded buffer.
    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
        }
    }
}

/// Map a canvas-style quality in `0.0..=1.0` to a PNG compression level.
pub fn png_compression_for_quality(quality: f32) -> CompressionType {
    let quality = if quality.is_nan() { 1.0 } else { quality.clamp(0.0, 1.0) };
    if quality >= 0.9 {
        CompressionType::Best
    } else if quality >= 0.4 {
        CompressionType::Default
    } else {
        CompressionType::Fast
    }
}

/// Encode straight RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - Canvas-style quality, `1.0` for maximum compression effort
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: f32,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new_with_quality(
        &mut buffer,
        png_compression_for_quality(quality),
        PngFilter::Adaptive,
    );

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
