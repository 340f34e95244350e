//! Error types for hexmap services.

use thiserror::Error;

/// Result type alias using HexError.
pub type HexResult<T> = Result<T, HexError>;

/// Primary error type for hexmap operations.
///
/// Out-of-bounds hexes are deliberately absent: an extraction or grid view
/// for a hex outside the image returns a sentinel image, never an error.
#[derive(Debug, Error)]
pub enum HexError {
    // === Request Errors ===
    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    #[error("Image not found: {0}")]
    ImageNotFound(String),

    // === Engine Errors ===
    #[error("Source image unavailable: {0}")]
    SourceImageUnavailable(String),

    #[error("Image encoding failed: {0}")]
    EncodingFailure(String),

    // === Infrastructure Errors ===
    #[error("Image manifest error: {0}")]
    ManifestError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl HexError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HexError::InvalidParameter { .. } => 400,
            HexError::ImageNotFound(_) => 404,
            HexError::SourceImageUnavailable(_)
            | HexError::EncodingFailure(_)
            | HexError::ManifestError(_)
            | HexError::InternalError(_) => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for HexError {
    fn from(err: std::io::Error) -> Self {
        HexError::InternalError(err.to_string())
    }
}

impl From<serde_json::Error> for HexError {
    fn from(err: serde_json::Error) -> Self {
        HexError::ManifestError(format!("JSON error: {}", err))
    }
}
