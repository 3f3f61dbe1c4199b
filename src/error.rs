//! Error types for `unlzw`

use thiserror::Error;

/// The error type for `unlzw` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Header Errors ====================
    /// The input ended before all 3 header bytes could be read.
    #[error("truncated header: fewer than 3 bytes of input")]
    TruncatedHeader,

    /// The input does not start with the `.Z` magic bytes.
    #[error("invalid magic: expected 1f 9d, found {found:02x?}")]
    InvalidMagic {
        /// The two bytes actually read.
        found: [u8; 2],
    },

    /// The header declares a maximum code width above 16 bits.
    #[error("unsupported code width: {max_bits} bits (limit 16)")]
    UnsupportedBits {
        /// The declared maximum code width.
        max_bits: u32,
    },

    // ==================== Stream Errors ====================
    /// The underlying input source reported an error.
    #[error("read error: {0}")]
    Read(#[source] std::io::Error),

    /// The compressed stream violates the LZW protocol.
    #[error("corrupted stream: {message}")]
    CorruptStream {
        /// Description of the violation.
        message: String,
    },

    /// The output sink reported an unrecoverable error while flushing.
    #[error("write error: {0}")]
    Write(#[source] std::io::Error),
}

impl Error {
    /// The process exit status historically associated with each failure:
    /// 2 for bad magic, 4 for write errors, 3 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::InvalidMagic { .. } => 2,
            Error::Write(_) => 4,
            _ => 3,
        }
    }
}

/// A specialized Result type for `unlzw` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Error::InvalidMagic { found: [0, 0] }.exit_code(), 2);
        assert_eq!(Error::TruncatedHeader.exit_code(), 3);
        assert_eq!(Error::UnsupportedBits { max_bits: 17 }.exit_code(), 3);
        assert_eq!(
            Error::Read(std::io::Error::other("boom")).exit_code(),
            3
        );
        assert_eq!(
            Error::CorruptStream {
                message: "bad".into()
            }
            .exit_code(),
            3
        );
        assert_eq!(
            Error::Write(std::io::Error::other("boom")).exit_code(),
            4
        );
    }
}
