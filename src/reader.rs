//! Incremental reader of delimiter-started, multi-line records (FASTA-like).
//!
//! A record starts with a header line; its first byte is the record delimiter.
//! All following lines belong to the record until a line starting with the same
//! delimiter is found. That line is kept as a one-line lookahead and becomes the
//! header of the next record, so the underlying stream never needs to be seekable.

use std::io::{self, BufRead};

#[inline]
fn read_line(mut f: impl BufRead, buf: &mut Vec<u8>) -> io::Result<usize> {
    f.read_until(b'\n', buf)
}

/// Line length without the trailing `\n` or `\r\n`.
fn stripped_len(line: &[u8]) -> usize {
    match line {
        [.., b'\r', b'\n'] => line.len() - 2,
        [.., b'\n'] => line.len() - 1,
        _ => line.len(),
    }
}

/// One record: its header line and all body lines, byte-for-byte as in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// First byte of the header line.
    pub delimiter: u8,
    /// Raw record bytes, including all line terminators.
    pub content: Vec<u8>,
    /// Total length of the body lines, without the header and without line terminators.
    pub length: u64,
}

impl Record {
    /// Header line, without the line terminator.
    pub fn header(&self) -> &[u8] {
        let end = self.content.iter().position(|&b| b == b'\n').unwrap_or(self.content.len());
        let header = &self.content[..end];
        header.strip_suffix(b"\r").unwrap_or(header)
    }
}

pub struct RecordReader<R> {
    stream: R,
    /// Lookahead line, empty if there is none.
    pending: Vec<u8>,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            stream,
            pending: Vec::with_capacity(1024),
        }
    }

    /// Returns the next line without consuming it, or `None` at the end of the stream.
    fn peek_line(&mut self) -> io::Result<Option<&[u8]>> {
        if self.pending.is_empty() && read_line(&mut self.stream, &mut self.pending)? == 0 {
            return Ok(None);
        }
        Ok(Some(&self.pending))
    }

    /// Moves the lookahead line to the end of `out`.
    fn consume_line(&mut self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.pending);
        self.pending.clear();
    }

    /// Reads the next record, returns `None` once the input is exhausted.
    ///
    /// A body line that starts with the record delimiter is always treated as the start of a new record.
    pub fn read_next(&mut self) -> io::Result<Option<Record>> {
        let delimiter = match self.peek_line()? {
            Some(line) => line[0],
            None => return Ok(None),
        };
        let mut content = Vec::with_capacity(1024);
        self.consume_line(&mut content);

        let mut length = 0;
        while let Some(line) = self.peek_line()? {
            if line[0] == delimiter {
                break;
            }
            length += stripped_len(line) as u64;
            self.consume_line(&mut content);
        }
        Ok(Some(Record { delimiter, content, length }))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = io::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}
