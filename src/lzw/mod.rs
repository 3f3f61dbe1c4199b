//! Adaptive LZW (`.Z` / `compress`) stream decoding
//!
//! The on-disk format is a 3-byte header followed by a packed stream of
//! variable-width codes, 9 to at most 16 bits each, least-significant bit
//! first. Code groups are byte-block aligned: whenever the code width
//! changes, the stream skips ahead to the next `width * 8` bit boundary.

mod bits;
mod decoder;
mod header;
mod sink;
mod table;
mod width;

pub use decoder::Decoder;
pub use header::Header;

use std::io::{Read, Write};

use crate::error::Result;

/// `.Z` magic bytes
pub const MAGIC: [u8; 2] = [0x1f, 0x9d];

/// Mask for the code-width field in the header flags byte
pub const BIT_MASK: u8 = 0x1f;

/// Flags bit marking block-compress mode (code 256 reserved as CLEAR)
pub const BLOCK_MODE: u8 = 0x80;

/// Initial code width in bits
pub const INIT_BITS: u32 = 9;

/// Largest supported code width in bits
pub const MAX_BITS: u32 = 16;

/// Table-clear code, only meaningful in block mode
pub const CLEAR: u32 = 256;

/// First dictionary code in block mode (256 is reserved for CLEAR)
pub const FIRST: u32 = 257;

/// Input chunk size, plus slack so a 3-byte code window never runs off
/// the end of the buffer
pub(crate) const IBUFSIZ: usize = 2048;
pub(crate) const IBUF_SLACK: usize = 64;

/// Output flush chunk size
pub(crate) const OBUFSIZ: usize = 2048;

/// Dictionary capacity at the largest supported width
pub(crate) const TABLE_SIZE: usize = 1 << MAX_BITS as usize;

/// Decompress a whole `.Z` stream from `reader` into `writer`.
///
/// Reads and validates the header, then decodes to end of input.
/// Returns the number of decompressed bytes written.
///
/// # Errors
/// Returns an error if the header is invalid, the stream is corrupt, or
/// either side of the I/O fails.
pub fn decompress<R: Read, W: Write>(reader: R, writer: W) -> Result<u64> {
    Decoder::new(reader, writer)?.decode()
}
