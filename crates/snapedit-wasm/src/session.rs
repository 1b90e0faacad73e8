//! Edit session WASM bindings.
//!
//! Wraps the core [`EditSession`] over an in-memory raster surface. The host
//! owns the `<canvas>`; after any call that may have rendered it copies
//! `preview_pixels()` into an `ImageData` of `preview_width()` x
//! `preview_height()`.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditSession } from '@snapedit/wasm';
//!
//! const session = JsEditSession.with_config({ prefersReducedMotion: false });
//! session.resize_container(container.clientWidth, container.clientHeight);
//! session.load(new Uint8Array(await file.arrayBuffer()), file.type);
//!
//! slider.oninput = () => {
//!   session.set_filter_str('brightness', slider.value);
//!   requestAnimationFrame(() => {
//!     if (session.on_animation_frame()) paint(session);
//!   });
//! };
//! ```

use crate::types::{JsExportedImage, PreviewFrame};
use snapedit_core::error::ErrorKind;
use snapedit_core::state::{FilterKind, FlipAxis};
use snapedit_core::transform::TransformMatrix;
use snapedit_core::{EditSession, EditState, EditorConfig, FilterChain, ImageFile, SessionError};
use wasm_bindgen::prelude::*;

/// Convert a session error into the string thrown to JavaScript.
fn to_js_error(e: &SessionError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// The editor session: one image, its edit state and its preview.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
    last_error: Option<ErrorKind>,
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create an empty session with default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_config(EditorConfig::default())
    }

    /// Create an empty session from a (possibly partial) config object.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is not an object of the expected shape.
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        Ok(Self::from_config(config))
    }

    /// Whether an image is loaded.
    #[wasm_bindgen(getter)]
    pub fn loaded(&self) -> bool {
        self.inner.is_loaded()
    }

    /// Kind of the most recent failure (`"UnsupportedFormat"`, `"TooLarge"`,
    /// `"DecodeError"`, `"NoImage"`, `"EncodeError"`), cleared on success.
    #[wasm_bindgen(getter)]
    pub fn last_error_kind(&self) -> Option<String> {
        self.last_error.map(|k| k.as_str().to_string())
    }

    /// Validate, decode and install an image file.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The file contents
    /// * `mime` - The MIME type the browser reported (`File.type`)
    ///
    /// # Errors
    ///
    /// Throws a user-facing message; the previous image (if any) stays loaded.
    pub fn load(&mut self, bytes: Vec<u8>, mime: &str) -> Result<(), JsValue> {
        self.load_file(ImageFile::new(mime, bytes))
            .map_err(|e| to_js_error(&e))
    }

    /// Update the size of the element the preview must fit in.
    pub fn resize_container(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        let result = self.inner.resize_container(width, height);
        self.track(result).map_err(|e| to_js_error(&e))
    }

    /// Set a filter by name from a numeric value.
    ///
    /// # Errors
    ///
    /// Throws for an unrecognized filter name.
    pub fn set_filter(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        let kind = parse_filter(name)?;
        self.inner.set_filter(kind, value);
        Ok(())
    }

    /// Set a filter by name from a slider's string value.
    pub fn set_filter_str(&mut self, name: &str, value: &str) -> Result<(), JsValue> {
        let kind = parse_filter(name)?;
        self.inner.set_filter_str(kind, value);
        Ok(())
    }

    /// Current value of a filter, or `undefined` when nothing is loaded.
    pub fn filter_value(&self, name: &str) -> Result<Option<u16>, JsValue> {
        let kind = parse_filter(name)?;
        Ok(self.inner.state().map(|s| s.filters.get(kind)))
    }

    /// Rotate by `degrees` (positive is clockwise).
    pub fn rotate(&mut self, degrees: i32) {
        self.inner.rotate(degrees);
    }

    /// Toggle a flip: `"horizontal"` or `"vertical"`.
    pub fn flip(&mut self, axis: &str) -> Result<(), JsValue> {
        let axis: FlipAxis = axis.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.inner.flip(axis);
        Ok(())
    }

    /// Restore default filters and transform.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// Display-refresh hook. Returns `true` if the preview was re-rendered.
    pub fn on_animation_frame(&mut self) -> bool {
        self.inner.on_animation_frame()
    }

    /// Whether a change is waiting for `on_animation_frame`.
    #[wasm_bindgen(getter)]
    pub fn pending_frame(&self) -> bool {
        self.inner.has_pending_frame()
    }

    /// Switch to synchronous rendering (e.g. on `prefers-reduced-motion`).
    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.inner
            .set_schedule(snapedit_core::RenderSchedule::for_reduced_motion(reduced));
    }

    #[wasm_bindgen(getter)]
    pub fn preview_width(&self) -> u32 {
        self.inner.preview_size().0
    }

    #[wasm_bindgen(getter)]
    pub fn preview_height(&self) -> u32 {
        self.inner.preview_size().1
    }

    /// Returns the preview's RGBA pixels as a Uint8Array (a copy).
    pub fn preview_pixels(&self) -> Vec<u8> {
        self.inner.preview().pixels().to_vec()
    }

    /// CSS `filter` string for the current state, e.g. to style a DOM preview.
    pub fn css_filter(&self) -> String {
        self.inner
            .state()
            .map(|s| FilterChain::describe(&s.filters).css())
            .unwrap_or_else(|| FilterChain::default().css())
    }

    /// Canvas `setTransform(a, b, c, d, e, f)` arguments for the preview.
    pub fn transform_coefficients(&self) -> Vec<f64> {
        self.transform_matrix().coefficients().to_vec()
    }

    /// Preview size, CSS filter, transform and frame counter as one object.
    pub fn preview_frame(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.frame()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current edit state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        match self.inner.state() {
            Some(state) => serde_wasm_bindgen::to_value(state)
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// Replace the edit state from a plain object (values are re-clamped).
    pub fn restore_state(&mut self, value: JsValue) -> Result<(), JsValue> {
        let state: EditState =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.restore_state(state);
        Ok(())
    }

    /// Render at native resolution and encode as PNG.
    ///
    /// # Errors
    ///
    /// Throws "No image to save" when nothing is loaded, or the encoder's message.
    pub fn export(&mut self) -> Result<JsExportedImage, JsValue> {
        self.export_image().map_err(|e| to_js_error(&e))
    }
}

impl JsEditSession {
    pub(crate) fn from_config(config: EditorConfig) -> Self {
        Self {
            inner: EditSession::new(config),
            last_error: None,
        }
    }

    pub(crate) fn load_file(&mut self, file: ImageFile) -> Result<(), SessionError> {
        let result = self.inner.load(file);
        self.track(result)
    }

    pub(crate) fn export_image(&mut self) -> Result<JsExportedImage, SessionError> {
        let result = self.inner.export();
        self.track(result).map(JsExportedImage::from_exported)
    }

    pub(crate) fn frame(&self) -> PreviewFrame {
        let (width, height) = self.inner.preview_size();
        PreviewFrame {
            width,
            height,
            css_filter: self.css_filter(),
            transform: self.transform_matrix().coefficients(),
            frame: self.inner.frames_presented(),
        }
    }

    fn transform_matrix(&self) -> TransformMatrix {
        let (width, height) = self.inner.preview_size();
        let transform = self.inner.state().map(|s| s.transform).unwrap_or_default();
        TransformMatrix::compute(&transform, width, height)
    }

    fn track<T>(&mut self, result: Result<T, SessionError>) -> Result<T, SessionError> {
        self.last_error = result.as_ref().err().map(SessionError::kind);
        result
    }
}

fn parse_filter(name: &str) -> Result<FilterKind, JsValue> {
    name.parse().map_err(|e: snapedit_core::state::UnknownFilter| JsValue::from_str(&e.to_string()))
}
