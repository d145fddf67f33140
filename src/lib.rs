pub mod dimensions;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod io;
pub mod options;
pub mod payload;
pub mod report;
pub mod scanner;
pub mod writer;

pub use dimensions::{DimensionLimits, Dimensions, ImageDimensions};
pub use error::{ExtractError, Result};
pub use extraction::Extractor;
pub use formats::OutputFormat;
pub use options::ExtractOptions;
pub use payload::PixelBuffer;
pub use report::ExtractionReport;
pub use scanner::{MarkerHit, MarkerScanner};
pub use writer::{ImageSink, LocalFileWriter};
