use crate::error::{ExtractError, Result};
use crate::io::ByteStream;
use std::collections::VecDeque;
use std::io::{self, Read};

pub const DEFAULT_MARKER: &[u8] = b"Image8";
pub const DEFAULT_DELIMITER_LEN: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerHit {
    /// Index into the scanner's configured markers.
    pub marker: usize,
    /// Absolute offset of the marker's first byte.
    pub offset: u64,
}

/// Streaming search for record markers.
///
/// Consumes the stream byte by byte and keeps a sliding window no longer
/// than the longest marker. Every marker is compared against the tail of
/// the window after each byte; the first one that matches wins.
#[derive(Debug, Clone)]
pub struct MarkerScanner {
    markers: Vec<Vec<u8>>,
    window_len: usize,
    delimiter_len: u64,
}

impl MarkerScanner {
    pub fn new(markers: Vec<Vec<u8>>) -> Result<Self> {
        if markers.is_empty() {
            return Err(ExtractError::InvalidMarker(
                "at least one marker is required".to_string(),
            ));
        }
        if markers.iter().any(|m| m.is_empty()) {
            return Err(ExtractError::InvalidMarker(
                "markers must not be empty".to_string(),
            ));
        }

        let window_len = markers.iter().map(Vec::len).max().unwrap_or(0);
        Ok(Self {
            markers,
            window_len,
            delimiter_len: DEFAULT_DELIMITER_LEN,
        })
    }

    #[must_use]
    pub fn with_delimiter_len(mut self, delimiter_len: u64) -> Self {
        self.delimiter_len = delimiter_len;
        self
    }

    /// Advances `stream` until the last bytes read equal one of the markers.
    ///
    /// Returns `None` once the stream is exhausted; that is the normal end of
    /// a scan, not an error.
    pub fn find_marker<R: Read>(&self, stream: &mut ByteStream<R>) -> io::Result<Option<MarkerHit>> {
        let mut window: VecDeque<u8> = VecDeque::with_capacity(self.window_len + 1);

        while let Some(byte) = stream.next_byte()? {
            window.push_back(byte);
            if window.len() > self.window_len {
                window.pop_front();
            }

            if let Some(index) = self.match_tail(&window) {
                let offset = stream.position() - self.markers[index].len() as u64;
                return Ok(Some(MarkerHit {
                    marker: index,
                    offset,
                }));
            }
        }
        Ok(None)
    }

    /// Finds the next marker and steps over the delimiter that follows it,
    /// leaving the stream at the dimension header.
    pub fn find_record<R: Read>(&self, stream: &mut ByteStream<R>) -> io::Result<Option<MarkerHit>> {
        let Some(hit) = self.find_marker(stream)? else {
            return Ok(None);
        };
        stream.skip(self.delimiter_len)?;
        Ok(Some(hit))
    }

    fn match_tail(&self, window: &VecDeque<u8>) -> Option<usize> {
        self.markers.iter().position(|marker| {
            window.len() >= marker.len()
                && window
                    .iter()
                    .skip(window.len() - marker.len())
                    .eq(marker.iter())
        })
    }
}

impl Default for MarkerScanner {
    fn default() -> Self {
        Self {
            markers: vec![DEFAULT_MARKER.to_vec()],
            window_len: DEFAULT_MARKER.len(),
            delimiter_len: DEFAULT_DELIMITER_LEN,
        }
    }
}
