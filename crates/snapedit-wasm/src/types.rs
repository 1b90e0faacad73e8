//! WASM-compatible wrapper types.

use serde::Serialize;
use snapedit_core::ExportedImage;
use wasm_bindgen::prelude::*;

/// Everything the host needs to paint one preview frame, handed to JS as a
/// plain object:
///
/// ```typescript
/// const { width, height, cssFilter, transform } = session.preview_frame();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewFrame {
    pub width: u32,
    pub height: u32,
    /// CSS `filter` string for the current state.
    pub css_filter: String,
    /// `setTransform(a, b, c, d, e, f)` arguments.
    pub transform: [f64; 6],
    /// Renders presented so far; lets the host skip repaints.
    pub frame: u64,
}

/// An exported image ready to download.
///
/// # Memory Management
///
/// The encoded bytes live in WASM memory. `bytes()` copies them into a
/// JavaScript `Uint8Array`, which the host wraps in a `Blob`.
#[wasm_bindgen]
pub struct JsExportedImage {
    inner: ExportedImage,
}

#[wasm_bindgen]
impl JsExportedImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// MIME type for the `Blob`.
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime().to_string()
    }

    /// Returns the encoded file as a Uint8Array (a copy).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes.clone()
    }

    /// Download name stamped with the current time, e.g. `edited-image-1700000000000.png`.
    pub fn file_name(&self) -> String {
        self.file_name_at(js_sys::Date::now())
    }

    /// Download name stamped with `timestamp_millis`.
    pub fn file_name_at(&self, timestamp_millis: f64) -> String {
        self.inner.file_name(timestamp_millis.max(0.0) as u64)
    }
}

impl JsExportedImage {
    pub(crate) fn from_exported(inner: ExportedImage) -> Self {
        Self { inner }
    }
}
