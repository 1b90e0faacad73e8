//! Session-level error taxonomy.
//!
//! Every variant is recoverable: the session stays in the state it was in
//! before the failing call, and the message is fit to show the user.

use crate::decode::{format_size, DecodeError, Rejection};
use crate::encode::EncodeError;
use thiserror::Error;

/// Failure of a session entry point.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The declared MIME type is not on the allow-list.
    #[error("Unsupported format. Use JPG, PNG, GIF or WebP.")]
    UnsupportedFormat { mime: String },

    /// The file exceeds the size cap.
    #[error("File too large. Max {}.", format_size(*.max))]
    TooLarge { size: u64, max: u64 },

    /// The file passed validation but could not be decoded.
    #[error("Error loading image: {0}")]
    DecodeError(#[from] DecodeError),

    /// Export was requested with no image loaded.
    #[error("No image to save")]
    NoImage,

    /// The export surface could not be encoded.
    #[error("Error saving image: {0}")]
    EncodeError(#[from] EncodeError),
}

/// Fieldless mirror of [`SessionError`] for hosts that branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnsupportedFormat,
    TooLarge,
    DecodeError,
    NoImage,
    EncodeError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnsupportedFormat => "UnsupportedFormat",
            ErrorKind::TooLarge => "TooLarge",
            ErrorKind::DecodeError => "DecodeError",
            ErrorKind::NoImage => "NoImage",
            ErrorKind::EncodeError => "EncodeError",
        }
    }
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            SessionError::TooLarge { .. } => ErrorKind::TooLarge,
            SessionError::DecodeError(_) => ErrorKind::DecodeError,
            SessionError::NoImage => ErrorKind::NoImage,
            SessionError::EncodeError(_) => ErrorKind::EncodeError,
        }
    }
}

impl From<Rejection> for SessionError {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::UnsupportedFormat { mime } => SessionError::UnsupportedFormat { mime },
            Rejection::TooLarge { size, max } => SessionError::TooLarge { size, max },
        }
    }
}
