// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Echo input while it is being read

use std::io::{self, Read, Write};

/// A reader that copies everything it reads into a writer
///
/// The writer is flushed when the inner reader reaches end of stream.
#[derive(Debug)]
pub struct TeeReader<R, W> {
    inner: R,
    sink: W,
}

impl<R: Read, W: Write> TeeReader<R, W> {
    /// Wrap `inner`, echoing every byte read into `sink`
    pub fn new(inner: R, sink: W) -> Self {
        Self { inner, sink }
    }

    /// Unwrap into the reader and the writer
    pub fn into_parts(self) -> (R, W) {
        (self.inner, self.sink)
    }
}

impl<R: Read, W: Write> Read for TeeReader<R, W> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 {
            self.sink.flush()?;
        } else {
            self.sink.write_all(&buf[..n])?;
        }
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader};

    #[test]
    fn test_tee_copies_everything_read() {
        let input = "=== RUN   TestA\r\noutput \u{fffd}\nno newline at end";
        let mut tee = BufReader::new(TeeReader::new(input.as_bytes(), Vec::new()));

        let mut lines = Vec::new();
        let mut line = String::new();
        while tee.read_line(&mut line).expect("read") > 0 {
            lines.push(std::mem::take(&mut line));
        }

        let (_, echoed) = tee.into_inner().into_parts();
        assert_eq!(echoed, input.as_bytes());
        assert_eq!(lines.len(), 3);
    }
}
