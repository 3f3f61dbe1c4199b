//! The adaptive LZW decode engine
//!
//! One pass, one tight loop: pull codes off the bit stream at the current
//! width, expand each through the prefix/suffix table onto a reversal
//! stack, emit the run, and define one new table entry per code. The
//! dictionary the encoder built is reconstructed exactly one step behind,
//! which is what makes the KwKwK case decodable at all.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use super::bits::CodeReader;
use super::sink::SinkBuffer;
use super::table::CodeTable;
use super::width::WidthState;
use super::{CLEAR, Header, TABLE_SIZE};

/// A single-stream `.Z` decoder.
///
/// Owns every buffer the decode pass needs (input window, dictionary,
/// reversal stack, output buffer), so independent decoders can run side
/// by side.
pub struct Decoder<R: Read, W: Write> {
    bits: CodeReader<R>,
    sink: SinkBuffer<W>,
    table: CodeTable,
    width: WidthState,
    /// Reversal scratch for expanding one code; filled back to front
    stack: Vec<u8>,
    block_mode: bool,
    /// Previous code, `None` at stream start and right after a CLEAR
    oldcode: Option<u32>,
    /// First byte of the previously decoded string
    finchar: u8,
    /// Set once any code has been decoded; the literal-first rule only
    /// applies before this
    started: bool,
}

impl<R: Read, W: Write> Decoder<R, W> {
    /// Read and validate the stream header, then set up the decode state.
    ///
    /// # Errors
    /// Returns an error if the header is missing, has bad magic, or
    /// declares a code width above 16 bits.
    pub fn new(mut reader: R, writer: W) -> Result<Self> {
        let header = Header::read(&mut reader)?;
        Ok(Self::with_header(header, reader, writer))
    }

    /// Set up a decoder for a stream whose 3-byte header has already
    /// been consumed from `reader`.
    pub fn with_header(header: Header, reader: R, writer: W) -> Self {
        tracing::debug!(
            "lzw stream: max_bits={}, block_mode={}",
            header.max_bits,
            header.block_mode
        );
        Self {
            bits: CodeReader::new(reader),
            sink: SinkBuffer::new(writer),
            table: CodeTable::new(header.max_bits, header.block_mode),
            width: WidthState::new(header.max_bits),
            // One slot per possible table entry, plus the bottom literal
            // and the KwKwK byte
            stack: vec![0u8; TABLE_SIZE + 2],
            block_mode: header.block_mode,
            oldcode: None,
            finchar: 0,
            started: false,
        }
    }

    /// Decode the whole stream, returning the number of bytes written.
    ///
    /// # Errors
    /// Returns [`Error::CorruptStream`] on protocol violations, and
    /// [`Error::Read`]/[`Error::Write`] for I/O failures. A trailing
    /// group of bits shorter than one code is discarded silently.
    pub fn decode(mut self) -> Result<u64> {
        'refill: loop {
            self.bits.refill()?;
            let bound = self.bits.decodable_bits(self.width.n_bits());

            while self.bits.pos_bits() < bound {
                // Width growth is checked before each code so the switch
                // lands on the same code boundary the encoder used.
                if self.width.must_grow(self.table.free_ent()) {
                    self.bits.realign(self.width.n_bits());
                    self.width.grow();
                    tracing::trace!("code width now {} bits", self.width.n_bits());
                    continue 'refill;
                }

                let code = self.bits.next_code(self.width.n_bits(), self.width.bitmask());

                if self.block_mode && code == CLEAR && self.started {
                    tracing::trace!("clear at free_ent={}", self.table.free_ent());
                    self.table.clear();
                    self.bits.realign(self.width.n_bits());
                    self.width.reset();
                    // The encoder's dictionary is empty again, so the next
                    // code is necessarily a literal; treat it like the
                    // first code of the stream and define nothing for it.
                    self.oldcode = None;
                    continue 'refill;
                }

                self.handle_code(code)?;
            }

            if self.bits.at_eof() {
                break;
            }
        }

        let written = self.sink.finish()?;
        tracing::debug!("decoded {written} bytes");
        Ok(written)
    }

    fn handle_code(&mut self, incode: u32) -> Result<()> {
        let Some(oldcode) = self.oldcode else {
            // First code of the stream (or first after a CLEAR): nothing
            // to expand against, so it must be a plain byte.
            if incode > 0xff {
                return Err(Error::CorruptStream {
                    message: format!("first code {incode} is not a literal"),
                });
            }
            self.started = true;
            self.oldcode = Some(incode);
            self.finchar = incode as u8;
            return self.sink.push(&[incode as u8]);
        };

        let mut code = incode;
        let mut sp = self.stack.len();

        // KwKwK: the encoder referenced the entry it is about to define.
        // Its expansion is oldcode's string plus that string's first byte.
        if code >= self.table.free_ent() {
            if code > self.table.free_ent() {
                return Err(Error::CorruptStream {
                    message: format!(
                        "code {code} above next free entry {}",
                        self.table.free_ent()
                    ),
                });
            }
            sp -= 1;
            self.stack[sp] = self.finchar;
            code = oldcode;
        }

        // Walk the prefix chain down to a literal, collecting trailing
        // bytes in reverse. A chain longer than the stack means the table
        // is cyclic or otherwise malformed.
        while code > 0xff {
            if sp == 0 {
                return Err(Error::CorruptStream {
                    message: "prefix chain exceeds table capacity".into(),
                });
            }
            sp -= 1;
            self.stack[sp] = self.table.suffix(code);
            code = self.table.prefix(code);
        }
        self.finchar = code as u8;
        sp -= 1;
        self.stack[sp] = self.finchar;

        self.sink.push(&self.stack[sp..])?;

        self.table.define(oldcode, self.finchar);
        self.oldcode = Some(incode);
        Ok(())
    }
}
