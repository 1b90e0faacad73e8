//! Image loading for SnapEdit.
//!
//! This module provides functionality for:
//! - Checking a file against the accepted MIME types and size cap
//! - Decoding JPEG, PNG, GIF and WebP to RGBA, honoring EXIF orientation
//! - Fitting and resampling images for the preview surface
//!
//! # Load Phases
//!
//! A load is validation, then decode. Validation is cheap and synchronous;
//! decoding is the slow step that callers may run off the event loop. See
//! [`crate::session::EditSession::begin_load`].

mod decoder;
mod resize;
mod types;
mod validate;

pub use decoder::{decode_image, extract_orientation};
pub use resize::{fit_to_container, fit_within, resize, Fit};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
pub use validate::{format_size, validate_file, ImageFile, Rejection, SourceFormat, MAX_FILE_SIZE};
