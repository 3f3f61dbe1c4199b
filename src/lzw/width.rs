//! Code-width state machine
//!
//! The width starts at 9 bits and grows by one whenever the dictionary
//! outgrows the current width's code space, capping at the header's
//! `max_bits`. A CLEAR drops it back to 9. Both transitions are paired
//! with a bit-stream realignment handled by the caller.

use super::INIT_BITS;

pub(crate) struct WidthState {
    n_bits: u32,
    maxcode: u32,
    bitmask: u32,
    max_bits: u32,
    maxmaxcode: u32,
}

impl WidthState {
    pub(crate) fn new(max_bits: u32) -> Self {
        Self {
            n_bits: INIT_BITS,
            maxcode: (1 << INIT_BITS) - 1,
            bitmask: (1 << INIT_BITS) - 1,
            max_bits,
            maxmaxcode: 1 << max_bits,
        }
    }

    pub(crate) fn n_bits(&self) -> u32 {
        self.n_bits
    }

    pub(crate) fn bitmask(&self) -> u32 {
        self.bitmask
    }

    /// True when `free_ent` no longer fits in the current width.
    pub(crate) fn must_grow(&self, free_ent: u32) -> bool {
        free_ent > self.maxcode
    }

    /// Widen by one bit. At the top width `maxcode` becomes the full
    /// table size rather than `2^n - 1`, so growth never triggers again.
    pub(crate) fn grow(&mut self) {
        self.n_bits += 1;
        self.maxcode = if self.n_bits == self.max_bits {
            self.maxmaxcode
        } else {
            (1 << self.n_bits) - 1
        };
        self.bitmask = (1 << self.n_bits) - 1;
    }

    /// Back to the initial 9-bit width after a CLEAR.
    pub(crate) fn reset(&mut self) {
        self.n_bits = INIT_BITS;
        self.maxcode = (1 << INIT_BITS) - 1;
        self.bitmask = (1 << INIT_BITS) - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grows_one_bit_at_a_time() {
        let mut width = WidthState::new(16);
        assert_eq!(width.n_bits(), 9);
        assert!(!width.must_grow(511));
        assert!(width.must_grow(512));

        width.grow();
        assert_eq!(width.n_bits(), 10);
        assert_eq!(width.bitmask(), 1023);
        assert!(!width.must_grow(1023));
        assert!(width.must_grow(1024));
    }

    #[test]
    fn test_top_width_never_grows_again() {
        let mut width = WidthState::new(12);
        while width.n_bits() < 12 {
            width.grow();
        }
        // maxcode is the full table size at the top width, and free_ent
        // can never exceed it
        assert!(!width.must_grow(4096));
    }

    #[test]
    fn test_reset_returns_to_nine_bits() {
        let mut width = WidthState::new(16);
        width.grow();
        width.grow();
        width.reset();
        assert_eq!(width.n_bits(), 9);
        assert_eq!(width.bitmask(), 511);
        assert!(width.must_grow(512));
    }
}
