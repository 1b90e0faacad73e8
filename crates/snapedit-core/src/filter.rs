//! Filter chain: the ordered filter-effect descriptor shared by preview and export.
//!
//! The chain order is fixed: brightness, saturation, contrast, grayscale.
//! Each effect composes on top of the previous one, so both render paths
//! must apply the identical list to produce the same pixels.

use crate::state::{FilterKind, FilterSettings};
use serde::{Deserialize, Serialize};

/// One entry in a filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterEffect {
    pub kind: FilterKind,
    /// Percentage, already clamped by the edit state.
    pub percentage: u16,
}

impl FilterEffect {
    /// Effect amount as a multiplier (100% = 1.0).
    pub fn amount(&self) -> f32 {
        self.percentage as f32 / 100.0
    }

    /// Check if this effect leaves pixels unchanged.
    pub fn is_identity(&self) -> bool {
        self.percentage == self.kind.identity()
    }

    /// CSS filter function name for this effect.
    pub fn css_function(&self) -> &'static str {
        match self.kind {
            FilterKind::Brightness => "brightness",
            FilterKind::Saturation => "saturate",
            FilterKind::Contrast => "contrast",
            FilterKind::Grayscale => "grayscale",
        }
    }
}

/// Ordered list of filter effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterChain {
    effects: [FilterEffect; 4],
}

impl FilterChain {
    /// Describe a set of filter values as an ordered chain.
    pub fn describe(filters: &FilterSettings) -> Self {
        let effects = FilterKind::ALL.map(|kind| FilterEffect {
            kind,
            percentage: filters.get(kind),
        });
        Self { effects }
    }

    /// The effects, in application order.
    pub fn effects(&self) -> &[FilterEffect] {
        &self.effects
    }

    /// `(name, percentage)` pairs, in application order.
    pub fn entries(&self) -> Vec<(&'static str, u16)> {
        self.effects
            .iter()
            .map(|e| (e.kind.name(), e.percentage))
            .collect()
    }

    /// Check if every effect is an identity.
    pub fn is_identity(&self) -> bool {
        self.effects.iter().all(FilterEffect::is_identity)
    }

    /// Render the chain as a CSS / canvas `filter` string.
    ///
    /// e.g. `brightness(100%) saturate(100%) contrast(100%) grayscale(0%)`
    pub fn css(&self) -> String {
        self.effects
            .iter()
            .map(|e| format!("{}({}%)", e.css_function(), e.percentage))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::describe(&FilterSettings::default())
    }
}
