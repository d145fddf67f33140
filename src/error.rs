use std::io;
use thiserror::Error;

/// Errors raised while carving embedded thumbnails out of a container.
///
/// Everything except an input-open failure is recoverable: the extraction
/// loop downgrades it to a skipped record and keeps scanning.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Truncated stream: needed {needed} bytes, only {available} available")]
    TruncatedStream { needed: u64, available: u64 },

    #[error("Image too large: {width}x{height} exceeds ceiling {max_width}x{max_height}")]
    OversizeImage {
        width: i32,
        height: i32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimension { width: i32, height: i32 },

    #[error("Invalid marker: {0}")]
    InvalidMarker(String),

    #[error("Invalid limits: {max_width}x{max_height} cannot be written as {format}")]
    InvalidLimits {
        max_width: u32,
        max_height: u32,
        format: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Encoding error: {0}")]
    Encode(String),
}

impl From<image::ImageError> for ExtractError {
    fn from(err: image::ImageError) -> Self {
        ExtractError::Encode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;
