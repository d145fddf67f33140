pub mod bmp;
pub mod png;

use crate::error::{ExtractError, Result};
use crate::payload::PixelBuffer;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Bmp,
    Png,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Bmp => "bmp",
            OutputFormat::Png => "png",
        }
    }

    /// Serializes an extracted image. Takes ownership since the PNG path
    /// reorders channels in place.
    pub fn encode(&self, pixels: PixelBuffer) -> Result<Vec<u8>> {
        match self {
            OutputFormat::Bmp => {
                bmp::encode_bmp(&pixels).map_err(|e| ExtractError::Encode(e.to_string()))
            }
            OutputFormat::Png => png::encode_png(pixels),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Bmp => write!(f, "BMP"),
            OutputFormat::Png => write!(f, "PNG"),
        }
    }
}
