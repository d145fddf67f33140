//! Extraction options

use crate::dimensions::DimensionLimits;
use crate::formats::OutputFormat;
use crate::scanner::{DEFAULT_DELIMITER_LEN, DEFAULT_MARKER};
use std::path::PathBuf;

/// Options for carving one container
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Byte sequences that introduce an image record
    pub markers: Vec<Vec<u8>>,
    /// Bytes skipped between a marker and the dimension header
    pub delimiter_len: u64,
    /// Largest accepted width and height
    pub limits: DimensionLimits,
    /// Encoding of the written images
    pub format: OutputFormat,
    /// Directory the images are written to
    pub output_dir: PathBuf,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            markers: vec![DEFAULT_MARKER.to_vec()],
            delimiter_len: DEFAULT_DELIMITER_LEN,
            limits: DimensionLimits::default(),
            format: OutputFormat::Bmp,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ExtractOptions {
    /// Replaces the marker set
    pub fn with_markers(mut self, markers: Vec<Vec<u8>>) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_limits(mut self, max_width: u32, max_height: u32) -> Self {
        self.limits = DimensionLimits {
            max_width,
            max_height,
        };
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }
}
