// ABOUTME: Error types for the icon conversion pipeline with client-safe messages
// ABOUTME: Separates user-recoverable input failures from internal processing failures

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Uploaded file is empty")]
    EmptyInput,

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid icon size: {0}")]
    InvalidSize(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

impl ConversionError {
    /// Message that is safe to show to the uploader.
    ///
    /// Decoder and encoder details stay in the server log.
    pub fn user_message(&self) -> &'static str {
        match self {
            ConversionError::EmptyInput => "Error: Empty file",
            ConversionError::InvalidImage(_) => "Invalid image file",
            ConversionError::InvalidSize(_) => "Error: Invalid size",
            ConversionError::ProcessingFailed(_) => "Processing failed",
        }
    }

    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            ConversionError::EmptyInput => Some("Choose a non-empty image file and upload it again"),
            ConversionError::InvalidImage(_) => {
                Some("Upload a PNG, JPEG, WebP, GIF, BMP or TIFF image")
            }
            ConversionError::InvalidSize(_) => Some("Pick an icon size between 1 and 256 pixels"),
            ConversionError::ProcessingFailed(_) => None,
        }
    }

    /// Whether the uploader can fix the failure by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ConversionError::EmptyInput | ConversionError::InvalidSize(_)
        )
    }
}
