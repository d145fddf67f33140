//! Extraction loop
//!
//! Drives scan -> dimensions -> payload -> encode cycles over one container
//! until no further marker is found. Every per-record failure becomes a
//! skipped or failed entry in the report; only opening the input is fatal.

use crate::dimensions::{Dimensions, ImageDimensions};
use crate::error::{ExtractError, Result};
use crate::formats::OutputFormat;
use crate::formats::bmp::fits_bmp;
use crate::io::ByteStream;
use crate::options::ExtractOptions;
use crate::payload::{PixelBuffer, extract_payload};
use crate::report::ExtractionReport;
use crate::scanner::MarkerScanner;
use crate::writer::{ImageSink, output_file_name};
use std::io::Read;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

const FALLBACK_STEM: &str = "image";

enum LoopState {
    Scanning,
    DimensionPending {
        offset: u64,
    },
    PayloadPending {
        offset: u64,
        dimensions: ImageDimensions,
    },
    Encoding {
        offset: u64,
        sequence: u64,
        pixels: PixelBuffer,
    },
    Done,
}

pub struct Extractor {
    scanner: MarkerScanner,
    options: ExtractOptions,
}

impl Extractor {
    /// Builds the scanner and checks that every image the ceiling admits
    /// can be encoded in the chosen format.
    pub fn new(options: ExtractOptions) -> Result<Self> {
        let limits = options.limits;
        if options.format == OutputFormat::Bmp && !fits_bmp(limits.max_width, limits.max_height) {
            return Err(ExtractError::InvalidLimits {
                max_width: limits.max_width,
                max_height: limits.max_height,
                format: options.format.to_string(),
            });
        }

        let scanner =
            MarkerScanner::new(options.markers.clone())?.with_delimiter_len(options.delimiter_len);
        Ok(Self { scanner, options })
    }

    /// Opens `path` and carves every embedded image into `sink`, naming
    /// outputs after the file stem. Failing to open the input is the only
    /// error returned.
    pub fn run_path<S: ImageSink>(&self, path: &Path, sink: &mut S) -> Result<ExtractionReport> {
        let stream = ByteStream::open(path)?;
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| FALLBACK_STEM.to_string());

        info!("Scanning {} for embedded images", path.display());

        let mut report = self.run_stream(stream, &stem, sink);
        report.source = path.display().to_string();
        Ok(report)
    }

    pub fn run<R: Read, S: ImageSink>(&self, reader: R, stem: &str, sink: &mut S) -> ExtractionReport {
        self.run_stream(ByteStream::new(reader), stem, sink)
    }

    fn run_stream<R: Read, S: ImageSink>(
        &self,
        mut stream: ByteStream<R>,
        stem: &str,
        sink: &mut S,
    ) -> ExtractionReport {
        let start_time = Instant::now();
        let mut report = ExtractionReport::new(stem.to_string(), self.options.format);
        // Scoped to this run; consumed even when encoding fails later.
        let mut sequence: u64 = 0;
        let mut state = LoopState::Scanning;

        loop {
            state = match state {
                LoopState::Scanning => match self.scanner.find_record(&mut stream) {
                    Ok(Some(hit)) => {
                        debug!("Marker {} found at offset {}", hit.marker, hit.offset);
                        LoopState::DimensionPending { offset: hit.offset }
                    }
                    Ok(None) => LoopState::Done,
                    Err(e) => {
                        error!("Read error at offset {}: {}", stream.position(), e);
                        report.scan_error = Some(e.to_string());
                        LoopState::Done
                    }
                },

                LoopState::DimensionPending { offset } => {
                    match Dimensions::read(&mut stream)
                        .and_then(|dims| dims.validate(&self.options.limits))
                    {
                        Ok(dimensions) => LoopState::PayloadPending { offset, dimensions },
                        Err(e) => skip(&mut report, offset, e),
                    }
                }

                LoopState::PayloadPending { offset, dimensions } => {
                    match extract_payload(&mut stream, dimensions) {
                        Ok(pixels) => {
                            sequence += 1;
                            LoopState::Encoding {
                                offset,
                                sequence,
                                pixels,
                            }
                        }
                        Err(e) => skip(&mut report, offset, e),
                    }
                }

                LoopState::Encoding {
                    offset,
                    sequence,
                    pixels,
                } => {
                    self.encode(&mut report, sink, stem, offset, sequence, pixels);
                    LoopState::Scanning
                }

                LoopState::Done => break,
            };
        }

        report.bytes_scanned = stream.position();
        report.duration = start_time.elapsed();

        info!(
            "Extraction complete: {} images written, {} skipped, {} failed in {:.2}s",
            report.extracted.len(),
            report.skipped.len(),
            report.failed.len(),
            report.duration.as_secs_f64()
        );

        report
    }

    fn encode<S: ImageSink>(
        &self,
        report: &mut ExtractionReport,
        sink: &mut S,
        stem: &str,
        offset: u64,
        sequence: u64,
        pixels: PixelBuffer,
    ) {
        let dimensions = pixels.dimensions();
        let name = output_file_name(stem, sequence, self.options.format);

        let written = self
            .options
            .format
            .encode(pixels)
            .and_then(|data| sink.write(&name, &data));

        match written {
            Ok(path) => {
                debug!(
                    "Wrote {}x{} image to {}",
                    dimensions.width,
                    dimensions.height,
                    path.display()
                );
                report.add_extracted(sequence, offset, dimensions, path);
            }
            Err(e) => {
                warn!("Failed to write {}: {}", name, e);
                report.add_failed(sequence, offset, e.to_string());
            }
        }
    }
}

fn skip(report: &mut ExtractionReport, offset: u64, err: ExtractError) -> LoopState {
    warn!("Skipping record at offset {}: {}", offset, err);
    report.add_skipped(offset, err.to_string());
    LoopState::Scanning
}
