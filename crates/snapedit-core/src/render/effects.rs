//! Per-pixel filter effects.
//!
//! Implements the Filter Effects Module shorthand functions on straight
//! (non-premultiplied) normalized RGB, so results match a browser's
//! `ctx.filter` / CSS `filter`:
//!
//! ```text
//! brightness(a): C' = C * a
//! contrast(a):   C' = (C - 0.5) * a + 0.5
//! saturate(s):   3x3 color matrix, luminance weights 0.213/0.715/0.072
//! grayscale(a):  3x3 color matrix, luminance weights 0.2126/0.7152/0.0722
//! ```
//!
//! Every step clamps to `[0, 1]`, as each filter primitive does.

use crate::filter::{FilterChain, FilterEffect};
use crate::state::FilterKind;

type Matrix3 = [[f32; 3]; 3];

fn saturate_matrix(s: f32) -> Matrix3 {
    [
        [0.213 + 0.787 * s, 0.715 - 0.715 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 + 0.285 * s, 0.072 - 0.072 * s],
        [0.213 - 0.213 * s, 0.715 - 0.715 * s, 0.072 + 0.928 * s],
    ]
}

fn grayscale_matrix(amount: f32) -> Matrix3 {
    let a = 1.0 - amount.min(1.0);
    [
        [0.2126 + 0.7874 * a, 0.7152 - 0.7152 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 + 0.2848 * a, 0.0722 - 0.0722 * a],
        [0.2126 - 0.2126 * a, 0.7152 - 0.7152 * a, 0.0722 + 0.9278 * a],
    ]
}

#[inline]
fn apply_matrix(m: &Matrix3, rgb: [f32; 3]) -> [f32; 3] {
    let mut out = [0.0; 3];
    for (row, value) in m.iter().zip(out.iter_mut()) {
        *value = (row[0] * rgb[0] + row[1] * rgb[1] + row[2] * rgb[2]).clamp(0.0, 1.0);
    }
    out
}

/// A filter effect resolved to its per-pixel operation.
#[derive(Debug, Clone, Copy)]
enum Op {
    Linear { slope: f32, intercept: f32 },
    Matrix(Matrix3),
}

impl Op {
    fn from_effect(effect: &FilterEffect) -> Self {
        let a = effect.amount();
        match effect.kind {
            FilterKind::Brightness => Op::Linear {
                slope: a,
                intercept: 0.0,
            },
            FilterKind::Contrast => Op::Linear {
                slope: a,
                intercept: 0.5 - 0.5 * a,
            },
            FilterKind::Saturation => Op::Matrix(saturate_matrix(a)),
            FilterKind::Grayscale => Op::Matrix(grayscale_matrix(a)),
        }
    }

    #[inline]
    fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        match self {
            Op::Linear { slope, intercept } => rgb.map(|c| (c * slope + intercept).clamp(0.0, 1.0)),
            Op::Matrix(m) => apply_matrix(m, rgb),
        }
    }
}

/// Apply a filter chain to straight RGBA pixels in place.
///
/// Alpha is never changed and fully transparent pixels are skipped.
/// Identity effects are dropped up front, so an identity chain leaves the
/// buffer byte-for-byte unchanged.
pub fn apply_filter_chain(pixels: &mut [u8], chain: &FilterChain) {
    let ops: Vec<Op> = chain
        .effects()
        .iter()
        .filter(|e| !e.is_identity())
        .map(Op::from_effect)
        .collect();

    // Early exit if every effect is an identity
    if ops.is_empty() {
        return;
    }

    for px in pixels.chunks_exact_mut(4) {
        if px[3] == 0 {
            continue;
        }
        let mut rgb = [
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        ];
        for op in &ops {
            rgb = op.apply(rgb);
        }
        px[0] = (rgb[0] * 255.0).round() as u8;
        px[1] = (rgb[1] * 255.0).round() as u8;
        px[2] = (rgb[2] * 255.0).round() as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditState;
    use proptest::prelude::*;

    fn chain_with(settings: &[(FilterKind, f64)]) -> FilterChain {
        let mut state = EditState::new();
        for &(kind, value) in settings {
            state.set_filter(kind, value);
        }
        FilterChain::describe(&state.filters)
    }

    fn run(pixel: [u8; 4], chain: &FilterChain) -> [u8; 4] {
        let mut px = pixel.to_vec();
        apply_filter_chain(&mut px, chain);
        [px[0], px[1], px[2], px[3]]
    }

    #[test]
    fn test_identity_chain_is_noop() {
        let original: Vec<u8> = (0..=255).collect();
        let mut pixels = original.clone();
        apply_filter_chain(&mut pixels, &FilterChain::default());
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_brightness_scales_channels() {
        let chain = chain_with(&[(FilterKind::Brightness, 150.0)]);
        assert_eq!(run([100, 40, 200, 255], &chain), [150, 60, 255, 255]);

        let chain = chain_with(&[(FilterKind::Brightness, 0.0)]);
        assert_eq!(run([100, 40, 200, 255], &chain), [0, 0, 0, 255]);
    }

    #[test]
    fn test_contrast_pivots_on_mid_gray() {
        let chain = chain_with(&[(FilterKind::Contrast, 200.0)]);
        // 64/255 -> (0.251 - 0.5) * 2 + 0.5 = 0.002 -> 1
        let out = run([64, 128, 192, 255], &chain);
        assert!(out[0] <= 1);
        assert!((out[1] as i32 - 128).abs() <= 1);
        assert!(out[2] >= 254);

        let flat = chain_with(&[(FilterKind::Contrast, 0.0)]);
        assert_eq!(run([10, 240, 77, 255], &flat), [128, 128, 128, 255]);
    }

    #[test]
    fn test_full_grayscale_equalizes_channels() {
        let chain = chain_with(&[(FilterKind::Grayscale, 100.0)]);
        let out = run([200, 50, 10, 255], &chain);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
        // 0.2126*200 + 0.7152*50 + 0.0722*10 = 79.0
        assert!((out[0] as i32 - 79).abs() <= 1);
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let chain = chain_with(&[(FilterKind::Saturation, 0.0)]);
        let out = run([255, 0, 0, 255], &chain);
        assert_eq!(out[0], out[1]);
        assert_eq!(out[1], out[2]);
    }

    #[test]
    fn test_gray_is_stable_under_saturation() {
        let chain = chain_with(&[(FilterKind::Saturation, 200.0)]);
        let out = run([90, 90, 90, 255], &chain);
        for c in &out[..3] {
            assert!((*c as i32 - 90).abs() <= 1);
        }
    }

    #[test]
    fn test_order_matters() {
        // Brightness before contrast differs from contrast before brightness
        let chain = chain_with(&[(FilterKind::Brightness, 50.0), (FilterKind::Contrast, 200.0)]);
        let out = run([200, 200, 200, 255], &chain);
        // 200/255*0.5 = 0.392; (0.392-0.5)*2+0.5 = 0.284 -> 73
        assert!((out[0] as i32 - 73).abs() <= 1);
    }

    #[test]
    fn test_transparent_pixels_untouched() {
        let chain = chain_with(&[(FilterKind::Brightness, 200.0)]);
        assert_eq!(run([10, 20, 30, 0], &chain), [10, 20, 30, 0]);
        assert_eq!(run([10, 20, 30, 77], &chain), [20, 40, 60, 77]);
    }

    proptest! {
        /// Property: filtering never changes alpha.
        #[test]
        fn prop_alpha_preserved(
            px in any::<[u8; 4]>(),
            b in 0.0f64..=200.0,
            s in 0.0f64..=200.0,
            c in 0.0f64..=200.0,
            g in 0.0f64..=100.0,
        ) {
            let chain = chain_with(&[
                (FilterKind::Brightness, b),
                (FilterKind::Saturation, s),
                (FilterKind::Contrast, c),
                (FilterKind::Grayscale, g),
            ]);
            prop_assert_eq!(run(px, &chain)[3], px[3]);
        }
    }
}
