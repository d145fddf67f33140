use crate::dimensions::{BYTES_PER_PIXEL, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH, ImageDimensions};
use crate::error::{ExtractError, Result};
use crate::io::ByteStream;
use std::io::Read;

/// Largest buffer reserved up front: a full payload at the default
/// 2000x2000 ceiling. Bigger payloads grow as bytes arrive.
pub const MAX_INITIAL_CAPACITY: usize =
    DEFAULT_MAX_WIDTH as usize * DEFAULT_MAX_HEIGHT as usize * BYTES_PER_PIXEL;

/// Packed BGR pixels, three bytes per pixel, rows top to bottom in the
/// order they appear in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    dimensions: ImageDimensions,
}

impl PixelBuffer {
    pub fn from_bgr(data: Vec<u8>, dimensions: ImageDimensions) -> Result<Self> {
        if data.len() != dimensions.payload_len() {
            return Err(ExtractError::TruncatedStream {
                needed: dimensions.payload_len() as u64,
                available: data.len() as u64,
            });
        }
        Ok(Self { data, dimensions })
    }

    #[inline]
    pub fn dimensions(&self) -> ImageDimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.dimensions.height
    }

    #[inline]
    pub fn as_bgr(&self) -> &[u8] {
        &self.data
    }

    pub fn row(&self, index: usize) -> &[u8] {
        let row_len = self.dimensions.row_len();
        &self.data[index * row_len..(index + 1) * row_len]
    }

    /// Consumes the buffer and returns the same pixels in RGB order.
    pub fn into_rgb(mut self) -> Vec<u8> {
        for pixel in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.swap(0, 2);
        }
        self.data
    }
}

/// Reads `width * height * 3` bytes of pixel data. Callers must validate
/// the dimensions first. A truncated record only costs what the stream
/// actually held, not the size its header claimed.
pub fn extract_payload<R: Read>(
    stream: &mut ByteStream<R>,
    dimensions: ImageDimensions,
) -> Result<PixelBuffer> {
    let needed = dimensions.payload_len();
    let mut data = Vec::with_capacity(needed.min(MAX_INITIAL_CAPACITY));
    let read = stream.read_up_to(needed as u64, &mut data)?;

    if read < needed {
        return Err(ExtractError::TruncatedStream {
            needed: needed as u64,
            available: read as u64,
        });
    }

    Ok(PixelBuffer { data, dimensions })
}
