use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::decompression::maybe_decompress;
use crate::error::Error;
use crate::event::LogLine;

/// Open a log file, or stdin when `path` is `None`, decompressing gzip/zstd
/// transparently. The reader is `Send` so it can move into the segmenter thread.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead + Send>> {
    let (compression, reader) = match path {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            maybe_decompress(file)
                .with_context(|| format!("Failed to detect compression of {}", path.display()))?
        }
        None => maybe_decompress(io::stdin()).context("Failed to read from stdin")?,
    };
    debug!(?compression, "opened input");
    Ok(Box::new(BufReader::new(reader)))
}

/// Iterator over numbered input lines with line endings stripped.
///
/// Bytes that are not valid UTF-8 (Latin-1 player names, chat) are replaced
/// with U+FFFD rather than failing the line. Stops after the first read
/// failure, which is reported as `Error::Scan`.
pub struct LineScanner<R> {
    reader: R,
    buffer: Vec<u8>,
    line_num: usize,
    failed: bool,
}

impl<R: BufRead> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line_num: 0,
            failed: false,
        }
    }

    /// Number of lines read so far
    pub fn line_num(&self) -> usize {
        self.line_num
    }
}

impl<R: BufRead> Iterator for LineScanner<R> {
    type Item = Result<LogLine, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_num += 1;
                let text = String::from_utf8_lossy(&self.buffer);
                let text = text.trim_end_matches(['\r', '\n']);
                Some(Ok(LogLine::new(self.line_num, text)))
            }
            Err(source) => {
                self.failed = true;
                Some(Err(Error::Scan {
                    line: self.line_num,
                    source,
                }))
            }
        }
    }
}
