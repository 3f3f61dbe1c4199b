//! End-to-end decoder tests against a reference encoder.
//!
//! The encoder below is a test-local twin of the historical `compress`
//! writer: same insert timing, same width-growth points, and the same
//! byte-block group padding on width changes and CLEAR, so its output is
//! what period encoders actually produced.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;

use pretty_assertions::assert_eq;
use unlzw::{Error, lzw};

/// LSB-first bit packer tracking total emitted bits for group padding.
struct BitPacker {
    out: Vec<u8>,
    acc: u64,
    nbits: u32,
    total_bits: u64,
}

impl BitPacker {
    fn new(header: &[u8]) -> Self {
        Self {
            out: header.to_vec(),
            acc: 0,
            nbits: 0,
            total_bits: 0,
        }
    }

    fn put(&mut self, code: u32, n_bits: u32) {
        self.acc |= u64::from(code) << self.nbits;
        self.nbits += n_bits;
        self.total_bits += u64::from(n_bits);
        while self.nbits >= 8 {
            self.out.push(self.acc as u8);
            self.acc >>= 8;
            self.nbits -= 8;
        }
    }

    /// Zero-pad out the current `n_bits`-byte code group, as compress
    /// does before every width change.
    fn pad_to_group(&mut self, n_bits: u32) {
        let group = u64::from(n_bits) * 8;
        while self.total_bits % group != 0 {
            self.put(0, 1);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        if self.nbits > 0 {
            self.out.push(self.acc as u8);
        }
        self.out
    }
}

/// Reference LZW compressor. `clear_at` emits a CLEAR whenever `free_ent`
/// reaches the given value (block mode only); `None` lets the table fill
/// and stay full.
fn compress_with(data: &[u8], max_bits: u32, block_mode: bool, clear_at: Option<u32>) -> Vec<u8> {
    let flags = max_bits as u8 | if block_mode { 0x80 } else { 0 };
    let mut packer = BitPacker::new(&[0x1f, 0x9d, flags]);

    let maxmaxcode = 1u32 << max_bits;
    let mut n_bits = 9u32;
    let mut maxcode = (1u32 << 9) - 1;
    let mut free_ent: u32 = if block_mode { 257 } else { 256 };
    let mut dict: HashMap<(u32, u8), u32> = HashMap::new();
    let insert_limit = clear_at.unwrap_or(u32::MAX).min(maxmaxcode);

    let mut bytes = data.iter().copied();
    let Some(first) = bytes.next() else {
        return packer.finish();
    };
    let mut ent = u32::from(first);

    for c in bytes {
        if let Some(&code) = dict.get(&(ent, c)) {
            ent = code;
            continue;
        }

        packer.put(ent, n_bits);
        // Width check uses free_ent before this round's insert, matching
        // the decoder's check before its next read.
        if free_ent > maxcode {
            packer.pad_to_group(n_bits);
            n_bits += 1;
            maxcode = if n_bits == max_bits {
                maxmaxcode
            } else {
                (1 << n_bits) - 1
            };
        }

        if free_ent < insert_limit {
            dict.insert((ent, c), free_ent);
            free_ent += 1;
        } else if block_mode && clear_at.is_some() {
            packer.put(256, n_bits);
            packer.pad_to_group(n_bits);
            n_bits = 9;
            maxcode = (1 << 9) - 1;
            dict.clear();
            free_ent = 257;
        }
        ent = u32::from(c);
    }

    packer.put(ent, n_bits);
    packer.finish()
}

fn compress(data: &[u8], max_bits: u32, block_mode: bool) -> Vec<u8> {
    compress_with(data, max_bits, block_mode, None)
}

fn decompress(stream: &[u8]) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    lzw::decompress(stream, &mut out)?;
    Ok(out)
}

fn assert_round_trip(data: &[u8], max_bits: u32, block_mode: bool) {
    let stream = compress(data, max_bits, block_mode);
    let decoded = decompress(&stream).unwrap();
    assert_eq!(decoded, data, "max_bits={max_bits} block_mode={block_mode}");
}

/// Deterministic noise, so the dictionary grows on nearly every byte.
fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x2545f491u32;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            (state >> 16) as u8
        })
        .collect()
}

fn lorem(len: usize) -> Vec<u8> {
    b"to be or not to be, that is the question; "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

#[test]
fn test_concrete_three_literal_stream() {
    // Header 1f 9d 90 followed by 9-bit codes 0x41 0x42 0x41
    let stream = compress(b"ABA", 16, true);
    assert_eq!(stream, [0x1f, 0x9d, 0x90, 0x41, 0x84, 0x04, 0x01]);
    assert_eq!(decompress(&stream).unwrap(), b"ABA");
}

#[test]
fn test_round_trip_small_inputs() {
    for data in [&b""[..], b"A", b"ABA", b"abcabcabc", b"\x00\xff\x00\xff"] {
        assert_round_trip(data, 16, true);
        assert_round_trip(data, 16, false);
    }
}

#[test]
fn test_round_trip_kwkwk_runs() {
    // Runs of one byte hit the KwKwK case immediately and repeatedly
    for len in [2usize, 3, 4, 5, 17, 200] {
        assert_round_trip(&vec![b'a'; len], 16, true);
    }
}

#[test]
fn test_round_trip_all_max_bits() {
    let data = lorem(6000);
    for max_bits in 9..=16 {
        assert_round_trip(&data, max_bits, true);
        assert_round_trip(&data, max_bits, false);
    }
}

#[test]
fn test_round_trip_incompressible_data() {
    // Forces steady width growth and exercises every byte value
    assert_round_trip(&noise(40_000), 16, true);
}

#[test]
fn test_round_trip_all_byte_values() {
    let data: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    assert_round_trip(&data, 16, true);
}

#[test]
fn test_table_full_keeps_decoding() {
    // max_bits=9 fills the 512-entry table almost immediately; the
    // stream must keep decoding against the frozen table.
    let data = noise(8000);
    assert_round_trip(&data, 9, true);
    assert_round_trip(&data, 9, false);
}

#[test]
fn test_table_full_then_repetitive_tail() {
    let mut data = noise(2000);
    data.extend_from_slice(&lorem(4000));
    assert_round_trip(&data, 10, true);
}

#[test]
fn test_block_mode_clear_round_trip() {
    // CLEAR every 600 entries: the width has grown to 10 bits by then,
    // so the reset also exercises the realign-back-to-9-bits path. Noise
    // input defines an entry on nearly every byte, giving dozens of
    // clears over the stream.
    let data = noise(20_000);
    let stream = compress_with(&data, 16, true, Some(600));
    assert_eq!(decompress(&stream).unwrap(), data);
}

#[test]
fn test_clear_on_full_table() {
    let data = noise(30_000);
    let stream = compress_with(&data, 12, true, Some(1 << 12));
    assert_eq!(decompress(&stream).unwrap(), data);
}

#[test]
fn test_rejects_truncated_and_foreign_headers() {
    assert!(matches!(decompress(&[]), Err(Error::TruncatedHeader)));
    assert!(matches!(decompress(&[0x1f]), Err(Error::TruncatedHeader)));
    assert!(matches!(
        decompress(&[0x1f, 0x9d]),
        Err(Error::TruncatedHeader)
    ));
    // gzip magic
    assert!(matches!(
        decompress(&[0x1f, 0x8b, 0x08]),
        Err(Error::InvalidMagic { found: [0x1f, 0x8b] })
    ));
}

#[test]
fn test_rejects_unsupported_width() {
    assert!(matches!(
        decompress(&[0x1f, 0x9d, 0x91]),
        Err(Error::UnsupportedBits { max_bits: 17 })
    ));
}

#[test]
fn test_error_exit_codes_match_uncompress() {
    assert_eq!(
        decompress(&[0x1f, 0x8b, 0x08]).unwrap_err().exit_code(),
        2
    );
    assert_eq!(decompress(&[0x1f]).unwrap_err().exit_code(), 3);
    assert_eq!(
        decompress(&[0x1f, 0x9d, 0x91]).unwrap_err().exit_code(),
        3
    );
}

#[test]
fn test_truncated_body_is_not_an_error() {
    // Cutting the stream mid-group loses the tail but the format has no
    // trailer, so whatever whole codes remain still decode.
    let data = lorem(1000);
    let stream = compress(&data, 16, true);
    let cut = &stream[..stream.len() / 2];
    let decoded = decompress(cut).unwrap();
    assert!(data.starts_with(&decoded));
}

#[test]
fn test_file_to_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("data.Z");
    let dst = dir.path().join("data.out");

    let data = lorem(10_000);
    let mut f = File::create(&src).unwrap();
    f.write_all(&compress(&data, 16, true)).unwrap();
    drop(f);

    let written = lzw::decompress(
        File::open(&src).unwrap(),
        File::create(&dst).unwrap(),
    )
    .unwrap();
    assert_eq!(written, data.len() as u64);
    assert_eq!(std::fs::read(&dst).unwrap(), data);
}

#[test]
fn test_independent_decoders_do_not_share_state() {
    let a = compress(&lorem(3000), 16, true);
    let b = compress(&noise(3000), 12, false);

    let mut out_a = Vec::new();
    let mut out_b = Vec::new();
    let dec_a = lzw::Decoder::new(&a[..], &mut out_a).unwrap();
    let dec_b = lzw::Decoder::new(&b[..], &mut out_b).unwrap();
    dec_b.decode().unwrap();
    dec_a.decode().unwrap();

    assert_eq!(out_a, lorem(3000));
    assert_eq!(out_b, noise(3000));
}
