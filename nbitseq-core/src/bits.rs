//! Conversion between logical bit sequences and byte buffers.
//!
//! **Bit Ordering: MSB-first (Most Significant Bit first)**
//!
//! The first bit written lands in bit 7 of byte 0. With the 2-bit codes
//! A=00, C=01, G=10, T=11, the bits of "ACGT" fill one byte as `00011011`.

use crate::errors::{CodecError, Result};

/// Accumulates fixed-width codes into a byte buffer.
///
/// # Usage
///
/// 1. Create a new `BitWriter` with [`BitWriter::with_capacity`].
/// 2. Append codes with [`BitWriter::push_bits`].
/// 3. Call [`BitWriter::finish`] to retrieve the bytes. It fails unless the
///    total bit length is a multiple of 8; nothing is ever padded implicitly.
pub struct BitWriter {
    bytes: Vec<u8>,    // completed bytes
    buffer: u64,       // internal bit buffer
    buffer_bits: usize, // number of bits currently in buffer
}

impl BitWriter {
    pub fn with_capacity(total_bits: usize) -> Self {
        BitWriter {
            bytes: Vec::with_capacity(total_bits.div_ceil(8)),
            buffer: 0,
            buffer_bits: 0,
        }
    }

    /// Appends the low `width` bits of `value`, most significant first.
    pub fn push_bits(&mut self, value: u8, width: usize) {
        debug_assert!(width <= 8);
        let mask = (1u64 << width) - 1;
        self.buffer = (self.buffer << width) | (value as u64 & mask);
        self.buffer_bits += width;

        while self.buffer_bits >= 8 {
            self.buffer_bits -= 8;
            self.bytes.push((self.buffer >> self.buffer_bits) as u8);
            self.buffer &= (1 << self.buffer_bits) - 1; // Mask to keep remaining bits
        }
    }

    /// Appends `count` zero bits.
    pub fn push_zeros(&mut self, count: usize) {
        let mut left = count;
        while left > 0 {
            let width = left.min(8);
            self.push_bits(0, width);
            left -= width;
        }
    }

    /// Number of bits written so far.
    pub fn len_bits(&self) -> usize {
        self.bytes.len() * 8 + self.buffer_bits
    }

    pub fn finish(self) -> Result<Vec<u8>> {
        if self.buffer_bits > 0 {
            return Err(CodecError::MalformedStream(format!(
                "bit sequence of length {} is not a multiple of 8",
                self.len_bits()
            )));
        }
        Ok(self.bytes)
    }
}

/// Reads fixed-width codes back out of a byte buffer.
pub struct BitReader<'a> {
    bytes: &'a [u8],
    pos: usize, // next bit to read
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        BitReader { bytes, pos: 0 }
    }

    /// Total number of bits in the underlying buffer.
    pub fn len_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bits left after the read position.
    pub fn remaining(&self) -> usize {
        self.len_bits() - self.pos
    }

    /// Reads `width` (at most 8) bits without consuming them.
    pub fn peek_bits(&self, width: usize) -> Option<u8> {
        debug_assert!(width <= 8);
        if width > self.remaining() {
            return None;
        }

        let mut code = 0u8;
        for bit_pos in self.pos..self.pos + width {
            let byte_index = bit_pos / 8;
            let bit_in_byte = 7 - (bit_pos % 8); // MSB0
            code = (code << 1) | ((self.bytes[byte_index] >> bit_in_byte) & 1);
        }
        Some(code)
    }

    /// Reads and consumes `width` (at most 8) bits.
    pub fn read_bits(&mut self, width: usize) -> Option<u8> {
        let code = self.peek_bits(width)?;
        self.pos += width;
        Some(code)
    }

    /// Skips `count` bits, or returns `false` when fewer remain.
    pub fn skip(&mut self, count: usize) -> bool {
        if count > self.remaining() {
            return false;
        }
        self.pos += count;
        true
    }

    /// Whether every bit from the read position to the end is zero.
    pub fn rest_is_zero(&self) -> bool {
        self.bits_are_zero(self.pos, self.len_bits())
    }

    /// Whether every bit in `start..end` is zero.
    pub fn bits_are_zero(&self, start: usize, end: usize) -> bool {
        (start..end).all(|bit_pos| (self.bytes[bit_pos / 8] >> (7 - bit_pos % 8)) & 1 == 0)
    }
}

/// Packs a bit sequence into bytes, preserving left-to-right bit order.
///
/// The length of `bits` must be a multiple of 8.
pub fn pack(bits: &[bool]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::with_capacity(bits.len());
    for &bit in bits {
        writer.push_bits(bit as u8, 1);
    }
    writer.finish()
}

/// Expands bytes into exactly `8 * bytes.len()` bits.
pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    let mut reader = BitReader::new(bytes);
    let mut bits = Vec::with_capacity(reader.len_bits());
    while let Some(bit) = reader.read_bits(1) {
        bits.push(bit == 1);
    }
    bits
}

/// Renders bytes as space-separated groups of eight `0`/`1` characters.
pub fn format_bits(bytes: &[u8]) -> String {
    unpack(bytes)
        .chunks(8)
        .map(|byte| byte.iter().map(|&b| if b { '1' } else { '0' }).collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}
