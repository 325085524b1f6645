//! Terminal seams: `input` reads a line, `print` writes straight through.

use pretzl_eval::{InputProvider, OutputHandler};
use std::io::{self, BufRead, Write};

/// Answers each `input` with the next line of a reader, without its line ending.
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> InputProvider for LineInput<R> {
    fn read_input(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Writes each payload as-is and flushes, so prompts show before `input` blocks.
pub struct StreamOutput<W> {
    writer: W,
}

impl<W: Write> StreamOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputHandler for StreamOutput<W> {
    fn write_output(&mut self, text: &str) {
        let written = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush());
        if let Err(e) = written {
            tracing::warn!(error = %e, "failed to write program output");
        }
    }
}
