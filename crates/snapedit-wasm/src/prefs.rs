//! Theme preference bindings backed by `localStorage`.
//!
//! Storage can be unavailable (private browsing, sandboxed iframes, quota).
//! Reads then fall back to the default theme and writes are dropped with a
//! console warning; neither ever throws.

use snapedit_core::prefs::{Theme, THEME_STORAGE_KEY};
use wasm_bindgen::prelude::*;
use web_sys::Storage;

fn local_storage() -> Result<Storage, JsValue> {
    web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))
}

fn warn(context: &str, err: &JsValue) {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    web_sys::console::warn_1(&JsValue::from_str(&format!("{context}: {detail}")));
}

/// Load the stored theme (`"light"` or `"dark"`), defaulting to light.
#[wasm_bindgen]
pub fn load_theme() -> String {
    let stored = local_storage().and_then(|s| s.get_item(THEME_STORAGE_KEY));
    match stored {
        Ok(value) => Theme::from_stored(value.as_deref()).to_string(),
        Err(e) => {
            warn("Could not read theme preference", &e);
            Theme::default().to_string()
        }
    }
}

/// Persist a theme. Unknown values are stored as the default theme.
#[wasm_bindgen]
pub fn store_theme(theme: &str) {
    let theme = Theme::from_stored(Some(theme));
    if let Err(e) = local_storage().and_then(|s| s.set_item(THEME_STORAGE_KEY, theme.as_str())) {
        warn("Could not save theme preference", &e);
    }
}

/// Flip the stored theme and return the new one.
#[wasm_bindgen]
pub fn toggle_theme() -> String {
    let next = Theme::from_stored(Some(&load_theme())).toggled();
    store_theme(next.as_str());
    next.to_string()
}
