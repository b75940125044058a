// ABOUTME: Request-level error type for the upload endpoint and its HTTP mapping
// ABOUTME: Maps admission, form, and conversion failures to status codes and client-safe messages

use crate::constants::messages;
use crate::upload::UploadError;
use http::StatusCode;
use icoconv_core::ConversionError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("No file uploaded")]
    MissingFile,

    #[error("Upload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Malformed upload: {0}")]
    MalformedForm(String),

    #[error("Rate limit exceeded, retry in {}s", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

impl From<UploadError> for RequestError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { limit } => RequestError::PayloadTooLarge { limit },
            UploadError::NotMultipart => RequestError::MalformedForm(err.to_string()),
            UploadError::Malformed(detail) => RequestError::MalformedForm(detail),
        }
    }
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::MissingFile | RequestError::MalformedForm(_) => StatusCode::BAD_REQUEST,
            RequestError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RequestError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            RequestError::Conversion(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            RequestError::Conversion(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text sent to the client. Internal detail stays in the logs.
    pub fn user_message(&self) -> &'static str {
        match self {
            RequestError::MissingFile => messages::MISSING_FILE,
            RequestError::PayloadTooLarge { .. } => messages::PAYLOAD_TOO_LARGE,
            RequestError::MalformedForm(_) => messages::MALFORMED_FORM,
            RequestError::RateLimited { .. } => messages::RATE_LIMITED,
            RequestError::Conversion(err) => err.user_message(),
        }
    }

    /// Whole seconds for the `Retry-After` header, rounded up and never zero.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            RequestError::RateLimited { retry_after } => {
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                Some(secs.max(1))
            }
            _ => None,
        }
    }
}
