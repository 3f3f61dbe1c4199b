//! `.Z` stream header

use std::io::Read;

use crate::error::{Error, Result};
use super::{BIT_MASK, BLOCK_MODE, MAGIC, MAX_BITS};

/// The 3-byte `.Z` header: two magic bytes and one flags byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Maximum code width declared by the encoder, 9..=16 bits.
    pub max_bits: u32,
    /// Whether code 256 is reserved as the table-clear signal.
    pub block_mode: bool,
}

impl Header {
    /// Read and validate the 3-byte header from the start of a stream.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedHeader`] if fewer than 3 bytes are
    /// available, [`Error::InvalidMagic`] on a magic mismatch, and
    /// [`Error::UnsupportedBits`] if the declared width exceeds 16.
    pub fn read<R: Read>(reader: &mut R) -> Result<Header> {
        let mut raw = [0u8; 3];
        reader.read_exact(&mut raw).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                Error::TruncatedHeader
            } else {
                Error::Read(e)
            }
        })?;

        if raw[0..2] != MAGIC {
            return Err(Error::InvalidMagic {
                found: [raw[0], raw[1]],
            });
        }

        let max_bits = u32::from(raw[2] & BIT_MASK);
        if max_bits > MAX_BITS {
            return Err(Error::UnsupportedBits { max_bits });
        }

        Ok(Header {
            max_bits,
            block_mode: raw[2] & BLOCK_MODE != 0,
        })
    }
}
