//! Output sinks for extracted images
//!
//! The extraction loop hands finished files to an [`ImageSink`]; the local
//! implementation writes them next to each other in one directory.

use crate::error::{ExtractError, Result};
use crate::formats::OutputFormat;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::Builder;

#[cfg(unix)]
const OUTPUT_FILE_MODE: u32 = 0o666;

/// `<stem>_extracted_<n>.<ext>`
pub fn output_file_name(stem: &str, sequence: u64, format: OutputFormat) -> String {
    format!("{}_extracted_{}.{}", stem, sequence, format.extension())
}

/// Destination for encoded images.
pub trait ImageSink {
    /// Stores `data` under `name`, returning where it ended up.
    fn write(&mut self, name: &str, data: &[u8]) -> Result<PathBuf>;
}

/// Writes images into a directory on the local filesystem.
///
/// Each file is staged in a temporary file inside the same directory and
/// renamed over the final path, so a crash never leaves a half-written
/// image under the final name. Existing files are replaced. Staged files
/// are created with the same mode a plain create would give (`0666` minus
/// the umask), not the private mode temporary files normally get.
pub struct LocalFileWriter {
    output_dir: PathBuf,
    files_written: usize,
    bytes_written: u64,
}

impl LocalFileWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self> {
        let output_dir = output_dir.as_ref();
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            files_written: 0,
            bytes_written: 0,
        })
    }

    pub fn files_written(&self) -> usize {
        self.files_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl ImageSink for LocalFileWriter {
    fn write(&mut self, name: &str, data: &[u8]) -> Result<PathBuf> {
        let output_path = self.output_dir.join(name);

        let mut builder = Builder::new();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(fs::Permissions::from_mode(OUTPUT_FILE_MODE));
        }
        let mut staged = builder.tempfile_in(&self.output_dir)?;
        staged.write_all(data)?;
        staged.as_file().sync_all()?;
        staged
            .persist(&output_path)
            .map_err(|e| ExtractError::Io(e.error))?;

        self.files_written += 1;
        self.bytes_written += data.len() as u64;

        Ok(output_path)
    }
}
