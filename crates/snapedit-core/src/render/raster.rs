//! CPU raster surface.
//!
//! An RGBA8 buffer with canvas-like drawing semantics: a current transform,
//! `drawImage` into a destination rectangle with source-over compositing,
//! and a filter chain applied to the drawn pixels.
//!
//! # Sampling
//!
//! `draw_image` uses inverse mapping: each destination pixel center is taken
//! back through the current matrix into draw space, then into source pixel
//! coordinates, and sampled bilinearly with premultiplied weights. Quarter
//! turns at scale 1 land exactly on source pixel centers, so rotation and
//! flip are lossless.

use super::{DestRect, Surface};
use crate::decode::DecodedImage;
use crate::encode::{encode_png, EncodeError, ExportFormat};
use crate::filter::FilterChain;
use crate::transform::TransformMatrix;

/// RGBA8 drawing surface held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    transform: TransformMatrix,
}

impl RasterSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
            transform: TransformMatrix::default(),
        }
    }

    /// Straight RGBA pixel data, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Like a canvas: resizing resets contents and transform
        *self = Self::new(width, height);
    }

    fn clear(&mut self) {
        self.pixels.fill(0);
    }

    fn set_transform(&mut self, matrix: &TransformMatrix) {
        self.transform = *matrix;
    }

    fn draw_image(&mut self, source: &DecodedImage, dest: DestRect) {
        if source.is_empty() || dest.is_empty() || self.pixels.is_empty() {
            return;
        }

        let inverse = self.transform.inverse();
        let scale_x = source.width as f64 / dest.width;
        let scale_y = source.height as f64 / dest.height;
        let row_len = self.width as usize * 4;

        for (py, row) in self.pixels.chunks_exact_mut(row_len).enumerate() {
            for (px, dst) in row.chunks_exact_mut(4).enumerate() {
                let (u, v) = inverse.apply(px as f64 + 0.5, py as f64 + 0.5);
                if !dest.contains(u, v) {
                    continue;
                }

                let sx = (u - dest.x) * scale_x - 0.5;
                let sy = (v - dest.y) * scale_y - 0.5;
                let src = sample_bilinear(source, sx, sy);
                composite_over(dst, src);
            }
        }
    }

    fn apply_filter_chain(&mut self, chain: &FilterChain) {
        super::effects::apply_filter_chain(&mut self.pixels, chain);
    }

    fn to_encoded_buffer(&self, format: ExportFormat, quality: f32) -> Result<Vec<u8>, EncodeError> {
        match format {
            ExportFormat::Png => encode_png(&self.pixels, self.width, self.height, quality),
        }
    }
}

/// Sample a pixel using bilinear interpolation, clamping to the image edges.
///
/// Color is weighted by alpha so transparent neighbors do not bleed their
/// (meaningless) color into the result.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let taps = [
        (image.pixel(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (image.pixel(x1, y0), fx * (1.0 - fy)),
        (image.pixel(x0, y1), (1.0 - fx) * fy),
        (image.pixel(x1, y1), fx * fy),
    ];

    let mut color = [0.0f64; 3];
    let mut alpha = 0.0f64;
    for (p, w) in taps {
        let a = p[3] as f64 * w;
        alpha += a;
        for i in 0..3 {
            color[i] += p[i] as f64 * a;
        }
    }

    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    [
        (color[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (color[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (color[2] / alpha).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}

/// Source-over compositing of straight RGBA `src` onto `dst`.
#[inline]
fn composite_over(dst: &mut [u8], src: [u8; 4]) {
    match (src[3], dst[3]) {
        (0, _) => {}
        (255, _) | (_, 0) => dst.copy_from_slice(&src),
        (sa, da) => {
            let sa = sa as f32 / 255.0;
            let da = da as f32 / 255.0;
            let out_a = sa + da * (1.0 - sa);
            for i in 0..3 {
                let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
                dst[i] = c.clamp(0.0, 255.0).round() as u8;
            }
            dst[3] = (out_a * 255.0).round() as u8;
        }
    }
}
