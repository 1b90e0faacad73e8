//! Center-anchored affine matrix for rotation and flip.

use crate::state::TransformState;
use kurbo::{Affine, Point};

/// Exact `(sin, cos)` for a rotation that is a multiple of 90 degrees.
///
/// Falls back to floating-point trigonometry for other angles.
pub fn quarter_turn_sin_cos(degrees: i32) -> (f64, f64) {
    match degrees.rem_euclid(360) {
        0 => (0.0, 1.0),
        90 => (1.0, 0.0),
        180 => (0.0, -1.0),
        270 => (-1.0, 0.0),
        other => (other as f64).to_radians().sin_cos(),
    }
}

/// Affine transform applied around the canvas center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrix {
    affine: Affine,
}

impl TransformMatrix {
    /// Compute the matrix for a transform on a `width` x `height` canvas.
    ///
    /// Equivalent to: translate to the canvas center, rotate by the rotation
    /// angle, then scale by `(±1, ±1)` for the flips.
    pub fn compute(transform: &TransformState, width: u32, height: u32) -> Self {
        let (sin, cos) = quarter_turn_sin_cos(transform.rotation_degrees);
        let sx = if transform.flip_horizontal { -1.0 } else { 1.0 };
        let sy = if transform.flip_vertical { -1.0 } else { 1.0 };

        let center = Affine::translate((width as f64 / 2.0, height as f64 / 2.0));
        let rotate = Affine::new([cos, sin, -sin, cos, 0.0, 0.0]);
        let flip = Affine::scale_non_uniform(sx, sy);

        Self {
            affine: center * rotate * flip,
        }
    }

    /// The underlying affine.
    pub fn affine(&self) -> Affine {
        self.affine
    }

    /// Canvas `setTransform(a, b, c, d, e, f)` coefficients.
    pub fn coefficients(&self) -> [f64; 6] {
        self.affine.as_coeffs()
    }

    /// Map a draw-space point to surface pixels.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let p = self.affine * Point::new(x, y);
        (p.x, p.y)
    }

    /// Inverse matrix, mapping surface pixels back to draw space.
    ///
    /// Rotation and flip matrices always have determinant ±1, so the inverse
    /// always exists.
    pub fn inverse(&self) -> Self {
        Self {
            affine: self.affine.inverse(),
        }
    }
}

impl Default for TransformMatrix {
    fn default() -> Self {
        Self {
            affine: Affine::IDENTITY,
        }
    }
}
