//! Preview sizing: fit-to-container dimensions and proxy resampling.
//!
//! The preview never upscales: an image smaller than its container is shown
//! at native size.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::EmptyImage` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Dimensions and scale of an image fitted into a bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    pub width: u32,
    pub height: u32,
    /// `min(max_w / w, max_h / h, 1)`.
    pub scale: f64,
}

/// Fit `width` x `height` inside `max_width` x `max_height`, preserving
/// aspect ratio and never scaling above 1.
///
/// Fractional results are truncated, as a canvas does when assigned a
/// fractional width; every dimension is at least 1.
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> Fit {
    if width == 0 || height == 0 {
        return Fit {
            width: 0,
            height: 0,
            scale: 1.0,
        };
    }

    let scale = (max_width as f64 / width as f64)
        .min(max_height as f64 / height as f64)
        .min(1.0);

    // Absorb float residue such as 559.9999999 for an exact 560
    let scaled = |edge: u32| (((edge as f64) * scale + 1e-6).floor() as u32).max(1);

    Fit {
        width: scaled(width),
        height: scaled(height),
        scale,
    }
}

/// Fit an image into a container, leaving `margin` pixels in total on each
/// axis (half per side).
pub fn fit_to_container(
    width: u32,
    height: u32,
    container_width: u32,
    container_height: u32,
    margin: u32,
) -> Fit {
    fit_within(
        width,
        height,
        container_width.saturating_sub(margin).max(1),
        container_height.saturating_sub(margin).max(1),
    )
}
