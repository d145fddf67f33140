use crate::error::{ExtractError, Result};
use crate::io::ByteStream;
use std::io::Read;

pub const DIMENSION_HEADER_LEN: usize = 8;
pub const BYTES_PER_PIXEL: usize = 3;
pub const DEFAULT_MAX_WIDTH: u32 = 2000;
pub const DEFAULT_MAX_HEIGHT: u32 = 2000;

#[inline]
pub fn decode_le_i32(bytes: [u8; 4]) -> i32 {
    u32::from_le_bytes(bytes) as i32
}

/// Width and height exactly as stored in the container, before any checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: i32,
    pub height: i32,
}

/// Ceiling applied to decoded dimensions before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionLimits {
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for DimensionLimits {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

/// Dimensions that passed validation; safe to size buffers with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn from_le_bytes(bytes: [u8; DIMENSION_HEADER_LEN]) -> Self {
        Self {
            width: decode_le_i32([bytes[0], bytes[1], bytes[2], bytes[3]]),
            height: decode_le_i32([bytes[4], bytes[5], bytes[6], bytes[7]]),
        }
    }

    /// Reads the width/height pair at the current stream position.
    pub fn read<R: Read>(stream: &mut ByteStream<R>) -> Result<Self> {
        let mut header = [0u8; DIMENSION_HEADER_LEN];
        let read = stream.fill(&mut header)?;
        if read < DIMENSION_HEADER_LEN {
            return Err(ExtractError::TruncatedStream {
                needed: DIMENSION_HEADER_LEN as u64,
                available: read as u64,
            });
        }
        Ok(Self::from_le_bytes(header))
    }

    pub fn validate(&self, limits: &DimensionLimits) -> Result<ImageDimensions> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ExtractError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }

        let (width, height) = (self.width as u32, self.height as u32);
        if width > limits.max_width || height > limits.max_height {
            return Err(ExtractError::OversizeImage {
                width: self.width,
                height: self.height,
                max_width: limits.max_width,
                max_height: limits.max_height,
            });
        }

        Ok(ImageDimensions { width, height })
    }
}

impl ImageDimensions {
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    #[inline]
    pub fn payload_len(&self) -> usize {
        self.row_len() * self.height as usize
    }
}
