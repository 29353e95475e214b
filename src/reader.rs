use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use niffler::compression::Format;

use crate::error::{CaddError, Result};
use crate::record::RawScoreRow;
use crate::types::HEADER_LINES;

/// Data rows of a CADD text file, one per line after the two header lines.
pub struct ScoreRows<R: BufRead> {
    header: Vec<String>,
    line_buf: Vec<u8>,
    line_number: usize,
    inner: R,
}

impl<R: BufRead> ScoreRows<R> {
    pub fn header(&self) -> &[String] {
        &self.header
    }
}

fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}

impl ScoreRows<Box<dyn BufRead>> {
    /// Open a plain text file. Compressed files are rejected rather than decoded.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let reader: Box<dyn Read> = match niffler::sniff(Box::new(File::open(path)?)) {
            Ok((_, format)) if format != Format::No => {
                return Err(CaddError::CompressedInput(format));
            }
            Ok((reader, _)) => reader,
            // too short to carry a magic number, so it is not compressed either
            Err(niffler::Error::FileTooShort) => Box::new(File::open(path)?),
            Err(e) => return Err(e.into()),
        };
        Self::new(Box::new(BufReader::new(reader)))
    }

    pub fn from_stdin() -> Result<Self> {
        Self::new(Box::new(io::stdin().lock()))
    }
}

impl<R: BufRead> ScoreRows<R> {
    /// Consume the header lines from `reader`. A stream with fewer than two lines
    /// yields no rows.
    pub fn new(mut reader: R) -> Result<Self> {
        let mut header = Vec::with_capacity(HEADER_LINES);
        let mut line_number = 0;
        let mut line = Vec::new();
        for _ in 0..HEADER_LINES {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                break;
            }
            line_number += 1;
            // headers are only kept for display
            header.push(
                String::from_utf8_lossy(&line)
                    .trim_end_matches(&['\r', '\n'][..])
                    .to_owned(),
            );
        }
        Ok(Self {
            header,
            line_buf: line,
            line_number,
            inner: reader,
        })
    }
}

impl<R: BufRead> Iterator for ScoreRows<R> {
    type Item = Result<RawScoreRow>;

    fn next(&mut self) -> Option<Self::Item> {
        // a short header means the stream is already exhausted
        if self.header.len() < HEADER_LINES {
            return None;
        }
        self.line_buf.clear();
        match self.inner.read_until(b'\n', &mut self.line_buf) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                Some(RawScoreRow::parse(
                    trim(&self.line_buf).to_vec(),
                    self.line_number,
                ))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}
