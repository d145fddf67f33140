//! Per-run extraction report

use crate::dimensions::ImageDimensions;
use crate::formats::OutputFormat;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// An image that was carved and written successfully
#[derive(Debug, Clone, Serialize)]
pub struct ExtractedImage {
    /// Sequence number used in the output file name
    pub sequence: u64,
    /// Offset of the record marker in the source
    pub offset: u64,
    pub width: u32,
    pub height: u32,
    /// Where the encoded image was written
    pub path: PathBuf,
}

/// A marker whose record could not be carved
#[derive(Debug, Clone, Serialize)]
pub struct SkippedRecord {
    pub offset: u64,
    pub reason: String,
}

/// A carved image that could not be encoded or written
#[derive(Debug, Clone, Serialize)]
pub struct FailedImage {
    pub sequence: u64,
    pub offset: u64,
    pub reason: String,
}

/// Outcome of scanning one container
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// Source file path or label
    pub source: String,
    /// Output encoding
    pub format: String,
    pub extracted: Vec<ExtractedImage>,
    pub skipped: Vec<SkippedRecord>,
    pub failed: Vec<FailedImage>,
    /// Bytes consumed from the source
    pub bytes_scanned: u64,
    /// Read error that ended the scan early, if any
    pub scan_error: Option<String>,
    pub duration: Duration,
}

impl ExtractionReport {
    pub fn new(source: String, format: OutputFormat) -> Self {
        Self {
            source,
            format: format.extension().to_string(),
            extracted: Vec::new(),
            skipped: Vec::new(),
            failed: Vec::new(),
            bytes_scanned: 0,
            scan_error: None,
            duration: Duration::ZERO,
        }
    }

    pub fn add_extracted(
        &mut self,
        sequence: u64,
        offset: u64,
        dimensions: ImageDimensions,
        path: PathBuf,
    ) {
        self.extracted.push(ExtractedImage {
            sequence,
            offset,
            width: dimensions.width,
            height: dimensions.height,
            path,
        });
    }

    pub fn add_skipped(&mut self, offset: u64, reason: String) {
        self.skipped.push(SkippedRecord { offset, reason });
    }

    pub fn add_failed(&mut self, sequence: u64, offset: u64, reason: String) {
        self.failed.push(FailedImage {
            sequence,
            offset,
            reason,
        });
    }

    /// Markers seen, whether or not they produced an image
    pub fn records_found(&self) -> usize {
        self.extracted.len() + self.skipped.len() + self.failed.len()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str(&format!(
            "Extraction complete: {} images extracted from {}\n",
            self.extracted.len(),
            self.source
        ));

        summary.push_str(&format!(
            "Scanned {} bytes in {:.2}s, {} records found\n",
            self.bytes_scanned,
            self.duration.as_secs_f64(),
            self.records_found()
        ));

        for image in &self.extracted {
            summary.push_str(&format!(
                "  - #{} {}x{} -> {}\n",
                image.sequence,
                image.width,
                image.height,
                image.path.display()
            ));
        }

        if !self.skipped.is_empty() {
            summary.push_str(&format!("\n{} records skipped\n", self.skipped.len()));
        }

        if !self.failed.is_empty() {
            summary.push_str(&format!("{} images failed to write\n", self.failed.len()));
        }

        if let Some(err) = &self.scan_error {
            summary.push_str(&format!("Scan stopped early: {}\n", err));
        }

        summary
    }
}
