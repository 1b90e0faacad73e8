//! Render pipeline: turns a source image plus edit state into surface pixels.
//!
//! # Pipeline
//!
//! Every render, preview or export, runs the same four steps:
//! 1. Clear the surface
//! 2. Set the center-anchored transform for the surface's own dimensions
//! 3. Draw the source scaled to exactly fill the surface
//! 4. Apply the filter chain
//!
//! Preview and export differ only in the surface they hand in. The matrix is
//! recomputed on every call because it depends on the surface size.

mod effects;
mod raster;

pub use effects::apply_filter_chain;
pub use raster::RasterSurface;

use crate::decode::DecodedImage;
use crate::encode::{EncodeError, ExportFormat};
use crate::filter::FilterChain;
use crate::state::EditState;
use crate::transform::TransformMatrix;

/// Destination rectangle in draw space (before the surface transform).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DestRect {
    /// A `width` x `height` rectangle centered on the origin.
    pub fn centered(width: u32, height: u32) -> Self {
        let (w, h) = (width as f64, height as f64);
        Self {
            x: -w / 2.0,
            y: -h / 2.0,
            width: w,
            height: h,
        }
    }

    /// Half-open containment test.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// A 2D raster drawing surface.
///
/// This is the seam to the rendering primitive: the pipeline only talks to
/// a surface through these operations.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Resize the surface, discarding its contents.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear every pixel to transparent.
    fn clear(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, matrix: &TransformMatrix);

    /// Draw `source` into `dest` (draw space) through the current transform.
    fn draw_image(&mut self, source: &DecodedImage, dest: DestRect);

    /// Apply a filter chain to the drawn pixels.
    fn apply_filter_chain(&mut self, chain: &FilterChain);

    /// Encode the current contents.
    fn to_encoded_buffer(&self, format: ExportFormat, quality: f32) -> Result<Vec<u8>, EncodeError>;
}

/// Everything a render needs, resolved for one surface size.
///
/// Capturing the plan up front means a render always completes against the
/// state it was started with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderPlan {
    pub width: u32,
    pub height: u32,
    pub matrix: TransformMatrix,
    pub dest: DestRect,
    pub chain: FilterChain,
}

impl RenderPlan {
    pub fn new(state: &EditState, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            matrix: TransformMatrix::compute(&state.transform, width, height),
            dest: DestRect::centered(width, height),
            chain: FilterChain::describe(&state.filters),
        }
    }

    /// Run the plan against a surface of matching size.
    pub fn execute<S: Surface + ?Sized>(&self, image: &DecodedImage, surface: &mut S) {
        surface.clear();
        surface.set_transform(&self.matrix);
        surface.draw_image(image, self.dest);
        surface.apply_filter_chain(&self.chain);
    }
}

/// Render `image` with `state` onto `surface`, filling the surface.
pub fn render<S: Surface + ?Sized>(image: &DecodedImage, state: &EditState, surface: &mut S) {
    RenderPlan::new(state, surface.width(), surface.height()).execute(image, surface);
}
