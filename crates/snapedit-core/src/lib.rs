//! SnapEdit Core - Image editing library
//!
//! This crate provides the state-to-render pipeline for SnapEdit: file
//! validation and decoding, the edit state model, filter and transform
//! description, the render pipeline, preview scheduling and PNG export.
//!
//! The entry point for hosts is [`EditSession`]; the lower-level modules are
//! public for hosts that drive their own surfaces.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod filter;
pub mod prefs;
pub mod present;
pub mod render;
pub mod session;
pub mod state;
pub mod transform;

pub use config::EditorConfig;
pub use decode::{DecodedImage, ImageFile, SourceFormat};
pub use error::{ErrorKind, SessionError};
pub use filter::FilterChain;
pub use present::RenderSchedule;
pub use render::{render, RasterSurface, RenderPlan, Surface};
pub use session::{EditSession, ExportedImage};
pub use state::{EditState, FilterKind, FlipAxis, TransformOp};
pub use transform::TransformMatrix;
