//! SnapEdit WASM - WebAssembly bindings for SnapEdit
//!
//! This crate exposes the snapedit-core editing session to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `session` - The edit session (load, filters, transforms, preview, export)
//! - `types` - Exported images and the serialized preview frame
//! - `prefs` - Theme preference persisted in `localStorage`
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@snapedit/wasm';
//!
//! // Instantiate the generated module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! session.load(new Uint8Array(await file.arrayBuffer()), file.type);
//! session.rotate(90);
//!
//! const exported = session.export();
//! const blob = new Blob([exported.bytes()], { type: exported.mime });
//! ```

use wasm_bindgen::prelude::*;

mod prefs;
mod session;
mod types;

// Re-export public types
pub use prefs::{load_theme, store_theme, toggle_theme};
pub use session::JsEditSession;
pub use types::{JsExportedImage, PreviewFrame};

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
