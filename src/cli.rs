use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use thumbcarve::dimensions::{DEFAULT_MAX_HEIGHT, DEFAULT_MAX_WIDTH};
use thumbcarve::formats::OutputFormat;
use thumbcarve::options::ExtractOptions;

#[derive(Parser)]
#[command(name = "thumbcarve")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recover raw thumbnails embedded in camera container files", long_about = None)]
pub struct Cli {
    /// Container file to scan
    pub file: PathBuf,

    /// Output image format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Bmp)]
    pub format: FormatArg,

    /// Directory for extracted images
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Largest accepted image width
    #[arg(long, default_value_t = DEFAULT_MAX_WIDTH)]
    pub max_width: u32,

    /// Largest accepted image height
    #[arg(long, default_value_t = DEFAULT_MAX_HEIGHT)]
    pub max_height: u32,

    /// Record marker to search for (repeatable, defaults to "Image8")
    #[arg(short, long = "marker")]
    pub markers: Vec<String>,

    /// Print the extraction report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Bmp,
    Png,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Bmp => OutputFormat::Bmp,
            FormatArg::Png => OutputFormat::Png,
        }
    }
}

impl Cli {
    pub fn extract_options(&self) -> ExtractOptions {
        let mut options = ExtractOptions::default()
            .with_format(self.format.into())
            .with_output_dir(&self.output_dir)
            .with_limits(self.max_width, self.max_height);

        if !self.markers.is_empty() {
            options = options.with_markers(
                self.markers
                    .iter()
                    .map(|m| m.as_bytes().to_vec())
                    .collect(),
            );
        }
        options
    }
}
