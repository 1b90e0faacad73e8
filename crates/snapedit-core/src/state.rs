//! Edit state: the authoritative record of filter values and geometric transform.
//!
//! All mutation goes through clamping/normalizing setters, so a state at rest
//! always holds in-range values:
//!
//! | Field        | Range      | Default |
//! |--------------|------------|---------|
//! | `brightness` | 0..=200    | 100     |
//! | `saturation` | 0..=200    | 100     |
//! | `contrast`   | 0..=200    | 100     |
//! | `grayscale`  | 0..=100    | 0       |
//! | `rotation`   | 0, 90, 180, 270 | 0  |
//!
//! Rotation is normalized into `[0, 360)` with a floored modulo, so rotating
//! left once from 0 gives 270, the same as rotating right three times.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the four recognized filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Brightness,
    Saturation,
    Contrast,
    Grayscale,
}

impl FilterKind {
    /// All filters, in filter-chain order.
    pub const ALL: [FilterKind; 4] = [
        FilterKind::Brightness,
        FilterKind::Saturation,
        FilterKind::Contrast,
        FilterKind::Grayscale,
    ];

    /// Inclusive `(min, max)` range of the filter's percentage.
    pub fn range(self) -> (u16, u16) {
        match self {
            FilterKind::Brightness | FilterKind::Saturation | FilterKind::Contrast => (0, 200),
            FilterKind::Grayscale => (0, 100),
        }
    }

    /// Value that leaves the image unchanged.
    pub fn identity(self) -> u16 {
        match self {
            FilterKind::Grayscale => 0,
            _ => 100,
        }
    }

    /// Name used by the UI layer and in serialized state.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Brightness => "brightness",
            FilterKind::Saturation => "saturation",
            FilterKind::Contrast => "contrast",
            FilterKind::Grayscale => "grayscale",
        }
    }

    /// Clamp and round a raw slider value into this filter's range.
    ///
    /// Returns `None` for NaN, which carries no usable magnitude.
    pub fn clamp(self, raw: f64) -> Option<u16> {
        if raw.is_nan() {
            return None;
        }
        let (min, max) = self.range();
        Some(raw.round().clamp(min as f64, max as f64) as u16)
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown filter name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for FilterKind {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brightness" => Ok(FilterKind::Brightness),
            "saturation" | "saturate" => Ok(FilterKind::Saturation),
            "contrast" => Ok(FilterKind::Contrast),
            "grayscale" | "greyscale" => Ok(FilterKind::Grayscale),
            _ => Err(UnknownFilter(s.to_string())),
        }
    }
}

/// Filter percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSettings {
    pub brightness: u16,
    pub saturation: u16,
    pub contrast: u16,
    pub grayscale: u16,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brightness: FilterKind::Brightness.identity(),
            saturation: FilterKind::Saturation.identity(),
            contrast: FilterKind::Contrast.identity(),
            grayscale: FilterKind::Grayscale.identity(),
        }
    }
}

impl FilterSettings {
    /// Read one filter's percentage.
    pub fn get(&self, kind: FilterKind) -> u16 {
        match kind {
            FilterKind::Brightness => self.brightness,
            FilterKind::Saturation => self.saturation,
            FilterKind::Contrast => self.contrast,
            FilterKind::Grayscale => self.grayscale,
        }
    }

    fn slot(&mut self, kind: FilterKind) -> &mut u16 {
        match kind {
            FilterKind::Brightness => &mut self.brightness,
            FilterKind::Saturation => &mut self.saturation,
            FilterKind::Contrast => &mut self.contrast,
            FilterKind::Grayscale => &mut self.grayscale,
        }
    }

    /// Check if every filter is at its identity value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Axis for a flip operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

impl FromStr for FlipAxis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" | "x" => Ok(FlipAxis::Horizontal),
            "vertical" | "v" | "y" => Ok(FlipAxis::Vertical),
            _ => Err(format!("Unknown flip axis: {s}")),
        }
    }
}

/// A single geometric edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOp {
    /// Rotate by a signed number of degrees (snapped to a quarter turn).
    Rotate(i32),
    /// Toggle a flip.
    Flip(FlipAxis),
}

/// Rotation and flip flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformState {
    /// Clockwise rotation in degrees; always one of 0, 90, 180, 270.
    pub rotation_degrees: i32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

impl TransformState {
    /// Check if the transform leaves the image unchanged.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Normalize a rotation into `[0, 360)`, snapping to the nearest quarter turn.
pub fn normalize_rotation(degrees: i64) -> i32 {
    let snapped = ((degrees as f64) / 90.0).round() as i64 * 90;
    snapped.rem_euclid(360) as i32
}

/// Current filter and transform values for the active image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    pub filters: FilterSettings,
    pub transform: TransformState,
}

impl EditState {
    /// Create the default (identity) state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the default record unconditionally.
    pub fn reset() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Set one filter, clamping and rounding the raw value.
    ///
    /// NaN leaves the field unchanged; every other input is accepted.
    pub fn set_filter(&mut self, kind: FilterKind, raw: f64) {
        if let Some(value) = kind.clamp(raw) {
            *self.filters.slot(kind) = value;
        }
    }

    /// Set one filter from a slider's textual value (e.g. `"150"`).
    ///
    /// Text that does not parse as a number leaves the field unchanged.
    pub fn set_filter_str(&mut self, kind: FilterKind, raw: &str) {
        if let Ok(value) = raw.trim().parse::<f64>() {
            self.set_filter(kind, value);
        }
    }

    /// Apply a rotation or flip.
    pub fn set_transform(&mut self, op: TransformOp) {
        match op {
            TransformOp::Rotate(delta) => {
                let next = self.transform.rotation_degrees as i64 + delta as i64;
                self.transform.rotation_degrees = normalize_rotation(next);
            }
            TransformOp::Flip(FlipAxis::Horizontal) => {
                self.transform.flip_horizontal = !self.transform.flip_horizontal;
            }
            TransformOp::Flip(FlipAxis::Vertical) => {
                self.transform.flip_vertical = !self.transform.flip_vertical;
            }
        }
    }

    /// Re-establish the range invariants on a state from an untrusted source
    /// (e.g. deserialized JSON).
    pub fn sanitized(self) -> Self {
        let mut out = Self {
            filters: FilterSettings::default(),
            transform: TransformState {
                rotation_degrees: normalize_rotation(self.transform.rotation_degrees as i64),
                ..self.transform
            },
        };
        for kind in FilterKind::ALL {
            out.set_filter(kind, self.filters.get(kind) as f64);
        }
        out
    }
}
