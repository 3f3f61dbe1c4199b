//! Direct-indexed prefix/suffix dictionary
//!
//! Entries are addressed by code value in two preallocated arrays, the
//! way the original `compress` tables worked; there is no hashing and no
//! per-entry allocation. Codes 0..=255 are the permanent literal entries.

use super::{FIRST, TABLE_SIZE};

pub(crate) struct CodeTable {
    prefixes: Vec<u16>,
    suffixes: Vec<u8>,
    /// Next code to be defined
    free_ent: u32,
    /// One past the largest definable code, `2^max_bits`
    maxmaxcode: u32,
}

impl CodeTable {
    pub(crate) fn new(max_bits: u32, block_mode: bool) -> Self {
        let mut suffixes = vec![0u8; TABLE_SIZE];
        for (code, suffix) in suffixes.iter_mut().take(256).enumerate() {
            *suffix = code as u8;
        }
        Self {
            prefixes: vec![0u16; TABLE_SIZE],
            suffixes,
            free_ent: if block_mode { FIRST } else { 256 },
            maxmaxcode: 1 << max_bits,
        }
    }

    pub(crate) fn free_ent(&self) -> u32 {
        self.free_ent
    }

    pub(crate) fn prefix(&self, code: u32) -> u32 {
        u32::from(self.prefixes[code as usize])
    }

    pub(crate) fn suffix(&self, code: u32) -> u8 {
        self.suffixes[code as usize]
    }

    /// Allocate the next entry. Once the table is full this is a silent
    /// no-op: decoding continues against the existing entries, matching
    /// encoders that keep emitting without signaling a clear.
    pub(crate) fn define(&mut self, prefix: u32, suffix: u8) {
        if self.free_ent < self.maxmaxcode {
            self.prefixes[self.free_ent as usize] = prefix as u16;
            self.suffixes[self.free_ent as usize] = suffix;
            self.free_ent += 1;
        }
    }

    /// Reset dictionary growth after a CLEAR code. The literal entries
    /// are never overwritten, so only the allocation cursor moves.
    pub(crate) fn clear(&mut self) {
        self.free_ent = FIRST;
    }
}
