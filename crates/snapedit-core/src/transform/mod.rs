//! Geometric transform: rotation and flip as an affine matrix.
//!
//! # Coordinate System
//!
//! Canvas conventions throughout:
//! - Origin is the top-left corner, y grows downward
//! - Positive rotation angles turn clockwise on screen
//! - The matrix maps draw space (centered on the canvas) to surface pixels
//!
//! # Composition
//!
//! The matrix is `translate(center) · rotate(θ) · scale(flip)`, so the flip
//! is applied first, then the rotation, both about the canvas center.

mod matrix;

pub use matrix::{quarter_turn_sin_cos, TransformMatrix};
