use std::fs::File;
use std::io::{self, BufReader, ErrorKind, Read};
use std::path::Path;

pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Forward-only byte stream over a container file.
///
/// The cursor only ever advances; `position` is the absolute offset of the
/// next byte to be read.
pub struct ByteStream<R: Read> {
    reader: BufReader<R>,
    position: u64,
}

impl ByteStream<File> {
    /// Opens a regular file. Directories and other non-file paths fail here
    /// rather than on the first read.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        if !file.metadata()?.is_file() {
            return Err(io::Error::new(
                ErrorKind::InvalidInput,
                format!("not a regular file: {}", path.display()),
            ));
        }
        Ok(Self::new(file))
    }
}

impl<R: Read> ByteStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(READ_BUFFER_SIZE, reader),
            position: 0,
        }
    }

    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.reader.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.position += 1;
                    return Ok(Some(byte[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Reads until `buf` is full or the stream ends. Returns the number of
    /// bytes actually placed in `buf`.
    pub fn fill(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.reader.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        self.position += filled as u64;
        Ok(filled)
    }

    /// Appends at most `limit` bytes to `out`, growing it only as data
    /// actually arrives. Returns the number of bytes appended.
    pub fn read_up_to(&mut self, limit: u64, out: &mut Vec<u8>) -> io::Result<usize> {
        let read = (&mut self.reader).take(limit).read_to_end(out)?;
        self.position += read as u64;
        Ok(read)
    }

    pub fn skip(&mut self, count: u64) -> io::Result<u64> {
        let skipped = io::copy(&mut (&mut self.reader).take(count), &mut io::sink())?;
        self.position += skipped;
        Ok(skipped)
    }
}
