//! File acceptance: MIME allow-list and size cap, checked before any decode.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Largest accepted file, in bytes (10 MiB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Image formats the editor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl SourceFormat {
    /// All accepted formats.
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::Jpeg,
        SourceFormat::Png,
        SourceFormat::Gif,
        SourceFormat::Webp,
    ];

    /// Look up a format by its exact MIME type.
    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.mime() == mime)
    }

    /// MIME type, e.g. `image/jpeg`.
    pub fn mime(self) -> &'static str {
        match self {
            SourceFormat::Jpeg => "image/jpeg",
            SourceFormat::Png => "image/png",
            SourceFormat::Gif => "image/gif",
            SourceFormat::Webp => "image/webp",
        }
    }

    /// Corresponding `image` crate format.
    pub fn image_format(self) -> image::ImageFormat {
        match self {
            SourceFormat::Jpeg => image::ImageFormat::Jpeg,
            SourceFormat::Png => image::ImageFormat::Png,
            SourceFormat::Gif => image::ImageFormat::Gif,
            SourceFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Raw file contents plus the MIME type the browser declared for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    /// File size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Why a file was refused before decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Unsupported format. Use JPG, PNG, GIF or WebP.")]
    UnsupportedFormat { mime: String },

    #[error("File too large. Max {}.", format_size(*.max))]
    TooLarge { size: u64, max: u64 },
}

/// Short human size for a byte cap: `10MB`, `512KB`, or `1500 bytes`.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    match bytes {
        b if b >= MB && b % MB == 0 => format!("{}MB", b / MB),
        b if b >= KB && b % KB == 0 => format!("{}KB", b / KB),
        b => format!("{b} bytes"),
    }
}

/// Check a file against the allow-list, then against `max_size`.
///
/// The format check runs first, so an oversized text file reports
/// `UnsupportedFormat`.
pub fn validate_file(file: &ImageFile, max_size: u64) -> Result<SourceFormat, Rejection> {
    let format = SourceFormat::from_mime(&file.mime).ok_or_else(|| Rejection::UnsupportedFormat {
        mime: file.mime.clone(),
    })?;

    if file.size() > max_size {
        return Err(Rejection::TooLarge {
            size: file.size(),
            max: max_size,
        });
    }

    Ok(format)
}
