// ABOUTME: Icon conversion core turning uploaded raster images into single-frame .ico files
// ABOUTME: Includes the conversion pipeline, glow post-processing, and the per-client admission guard

pub mod constants;
pub mod error;
pub mod glow;
pub mod guard;
pub mod icon;
pub mod pipeline;
pub mod test_helpers;

pub use error::ConversionError;
pub use guard::{Admission, Quota, RateLimiter};
pub use icon::{encode_ico, read_frame, IconFrame};
pub use pipeline::{convert, ConversionOptions, IconConverter, TargetEdge};

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConversionError>;
