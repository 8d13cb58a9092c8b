//! Newline framing over arbitrarily long lines.
//!
//! Reads through a fixed-size buffer. A line that does not fit in one fill of
//! the buffer is carried over fragment by fragment until its terminator shows
//! up, so callers never see a line length limit.

use std::io::{self, BufRead, BufReader, Read};

use tracing::trace;

/// Default internal buffer size (64KiB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// One logical record (line) of the input stream, without its terminator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number within the stream
    pub line_number: usize,
    pub bytes: Vec<u8>,
    /// `false` only for a final line that ran into end of stream
    pub terminated: bool,
}

/// Iterator of [`Record`]s read from a byte stream.
///
/// Lazy and single-pass. An I/O error is yielded once and ends the sequence.
pub struct FramedLineReader<R: Read> {
    reader: BufReader<R>,
    carry: Vec<u8>,
    fragments: usize,
    line_number: usize,
    done: bool,
}

impl<R: Read> FramedLineReader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(DEFAULT_BUFFER_CAPACITY, inner)
    }

    pub fn with_capacity(capacity: usize, inner: R) -> Self {
        Self {
            reader: BufReader::with_capacity(capacity.max(1), inner),
            carry: Vec::new(),
            fragments: 0,
            line_number: 0,
            done: false,
        }
    }

    fn finish_record(&mut self, terminated: bool) -> Record {
        self.line_number += 1;

        if terminated && self.carry.last() == Some(&b'\r') {
            self.carry.pop();
        }

        if self.fragments > 1 {
            trace!(
                line = self.line_number,
                fragments = self.fragments,
                bytes = self.carry.len(),
                "reassembled line spanning multiple reads"
            );
        }
        self.fragments = 0;

        Record { line_number: self.line_number, bytes: std::mem::take(&mut self.carry), terminated }
    }
}

impl<R: Read> Iterator for FramedLineReader<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let available = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            };

            if available.is_empty() {
                self.done = true;
                if self.carry.is_empty() && self.fragments == 0 {
                    return None;
                }
                return Some(Ok(self.finish_record(false)));
            }

            self.fragments += 1;
            match available.iter().position(|b| *b == b'\n') {
                Some(idx) => {
                    self.carry.extend_from_slice(&available[..idx]);
                    self.reader.consume(idx + 1);
                    return Some(Ok(self.finish_record(true)));
                }
                None => {
                    // Line in progress exceeds what is buffered, keep reading
                    let len = available.len();
                    self.carry.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }
}
