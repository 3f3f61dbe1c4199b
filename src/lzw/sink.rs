//! Buffered output adapter
//!
//! Decoded byte runs accumulate in a fixed-size buffer and are flushed
//! in [`OBUFSIZ`] chunks. A short write is not an error and is retried
//! with the remainder; a write of zero bytes with data still pending is.

use std::io::Write;

use crate::error::{Error, Result};
use super::OBUFSIZ;

pub(crate) struct SinkBuffer<W: Write> {
    writer: W,
    buf: Vec<u8>,
    written: u64,
}

impl<W: Write> SinkBuffer<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self {
            writer,
            buf: Vec::with_capacity(OBUFSIZ),
            written: 0,
        }
    }

    /// Append a decoded run, flushing each time the buffer fills.
    pub(crate) fn push(&mut self, mut bytes: &[u8]) -> Result<()> {
        while !bytes.is_empty() {
            let room = OBUFSIZ - self.buf.len();
            let take = room.min(bytes.len());
            self.buf.extend_from_slice(&bytes[..take]);
            bytes = &bytes[take..];
            if self.buf.len() == OBUFSIZ {
                self.flush_buf()?;
            }
        }
        Ok(())
    }

    /// Flush any residue and return the total bytes written.
    pub(crate) fn finish(mut self) -> Result<u64> {
        self.flush_buf()?;
        self.writer.flush().map_err(Error::Write)?;
        Ok(self.written)
    }

    fn flush_buf(&mut self) -> Result<()> {
        let mut pos = 0;
        while pos < self.buf.len() {
            match self.writer.write(&self.buf[pos..]) {
                Ok(0) => {
                    return Err(Error::Write(std::io::Error::new(
                        std::io::ErrorKind::WriteZero,
                        "sink accepted no bytes",
                    )));
                }
                Ok(n) => pos += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => return Err(Error::Write(e)),
            }
        }
        self.written += self.buf.len() as u64;
        self.buf.clear();
        Ok(())
    }
}
