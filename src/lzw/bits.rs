//! Variable-width code extraction from the compressed byte stream
//!
//! Codes are packed least-significant-bit first, so a code of width `n`
//! (9..=16) starting at an arbitrary bit offset spans at most 3 bytes.
//! The buffer keeps [`IBUF_SLACK`] zeroed bytes past the logical end so
//! the 3-byte window never indexes out of bounds; any stale bits picked
//! up there are masked off.

use std::io::Read;

use crate::error::{Error, Result};
use super::{IBUF_SLACK, IBUFSIZ};

pub(crate) struct CodeReader<R: Read> {
    reader: R,
    buf: Vec<u8>,
    /// Logical number of buffered bytes
    len: usize,
    /// Bit offset of the next unread code
    pos_bits: usize,
    /// Result of the most recent refill read; 0 means end of input
    last_read: usize,
}

impl<R: Read> CodeReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0u8; IBUFSIZ + IBUF_SLACK],
            len: 0,
            pos_bits: 0,
            last_read: usize::MAX,
        }
    }

    /// Drop fully consumed bytes and top the buffer back up from the
    /// underlying reader. Called once per decode round and after every
    /// code-width transition.
    pub(crate) fn refill(&mut self) -> Result<()> {
        // The consumed prefix is byte-aligned here: the decode loop only
        // leaves the inner loop at a code-group boundary or end of input.
        let consumed = (self.pos_bits >> 3).min(self.len);
        self.buf.copy_within(consumed..self.len, 0);
        self.len -= consumed;
        self.pos_bits -= consumed * 8;

        if self.len < IBUF_SLACK {
            loop {
                match self.reader.read(&mut self.buf[self.len..self.len + IBUFSIZ]) {
                    Ok(n) => {
                        self.last_read = n;
                        self.len += n;
                        break;
                    }
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                    Err(e) => return Err(Error::Read(e)),
                }
            }
        }
        Ok(())
    }

    /// Bit offset below which a whole code of width `n_bits` can be read.
    ///
    /// Mid-stream, only complete code groups (`n_bits` bytes = 8 codes)
    /// are decodable; at end of input the final partial group is decoded
    /// down to the last whole code, and any shorter residue is discarded.
    pub(crate) fn decodable_bits(&self, n_bits: u32) -> usize {
        let n = n_bits as usize;
        if self.last_read > 0 {
            (self.len - self.len % n) * 8
        } else {
            (self.len * 8).saturating_sub(n - 1)
        }
    }

    pub(crate) fn pos_bits(&self) -> usize {
        self.pos_bits
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.last_read == 0
    }

    /// Extract the next code of width `n_bits` and advance the cursor.
    ///
    /// Callers must have checked `pos_bits() < decodable_bits(n_bits)`.
    pub(crate) fn next_code(&mut self, n_bits: u32, bitmask: u32) -> u32 {
        let p = self.pos_bits >> 3;
        let window = u32::from(self.buf[p])
            | u32::from(self.buf[p + 1]) << 8
            | u32::from(self.buf[p + 2]) << 16;
        let code = (window >> (self.pos_bits & 7)) & bitmask;
        self.pos_bits += n_bits as usize;
        code
    }

    /// Skip forward to the next `n_bits * 8` bit boundary.
    ///
    /// Code groups are byte-block aligned on disk: when the width changes
    /// (growth or CLEAR), the encoder padded out the current group, so the
    /// partial group at the old width must be discarded, not decoded.
    pub(crate) fn realign(&mut self, n_bits: u32) {
        let group = n_bits as usize * 8;
        self.pos_bits = self.pos_bits.div_ceil(group) * group;
    }
}
