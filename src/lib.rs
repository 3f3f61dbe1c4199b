//! # unlzw
//!
//! A pure-Rust decoder for the classic `.Z` stream format produced by the
//! Unix `compress` utility (adaptive LZW, magic bytes `1f 9d`).
//!
//! The dictionary is rebuilt on the fly from the data already decoded, so
//! the format carries no side table: the decoder only needs the 3-byte
//! header and the code stream itself.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::stdout;
//!
//! let input = File::open("archive.tar.Z")?;
//! let written = unlzw::lzw::decompress(input, stdout().lock())?;
//! eprintln!("wrote {written} bytes");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! For incremental control over the stream, use [`lzw::Decoder`] directly.
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `unlzw` command-line binary

pub mod error;
pub mod lzw;

// Re-exports for convenience
pub use error::{Error, Result};
pub use lzw::{Decoder, Header, decompress};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
