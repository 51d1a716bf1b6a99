//! 2-bit tier: A, C, G, T.
//!
//! Layout:
//! ```text
//! [2b TAG=01][2b PP][2-bit symbols...][PP pairs of 0]
//! ```
//! `PP` (0..=3) is the number of zero pairs appended after the payload to
//! reach a byte boundary. Each symbol is a (keto, pyrimidine) pair:
//! A=00, C=01, G=10, T=11.

use log::trace;

use crate::alphabet::{DNA_2BIT_ALPHABET, Tier, normalize};
use crate::bits::{BitReader, BitWriter};
use crate::consts::{PAD_COUNT_BITS, TAG_2BIT, TAG_BITS};
use crate::errors::{CodecError, Result};

const HEADER_BITS: usize = TAG_BITS + PAD_COUNT_BITS;

/// Number of zero pairs that byte-align a stream carrying `symbols` symbols.
fn pad_pairs(symbols: usize) -> usize {
    let used = (HEADER_BITS + 2 * symbols) % 8;
    ((8 - used) % 8) / 2
}

/// Normalizes and encodes a sequence made only of A, C, G and T.
pub fn encode(sequence: &str) -> Result<Vec<u8>> {
    encode_normalized(&normalize(sequence))
}

pub(crate) fn encode_normalized(sequence: &str) -> Result<Vec<u8>> {
    let alphabet = &DNA_2BIT_ALPHABET;
    let symbols = sequence.len();
    let pad = pad_pairs(symbols);

    let mut writer = BitWriter::with_capacity(HEADER_BITS + 2 * (symbols + pad));
    writer.push_bits(TAG_2BIT, TAG_BITS);
    writer.push_bits(pad as u8, PAD_COUNT_BITS);
    for (position, symbol) in sequence.chars().enumerate() {
        writer.push_bits(
            alphabet.encode_symbol(symbol, position)?,
            alphabet.bits_per_symbol,
        );
    }
    writer.push_zeros(2 * pad);

    trace!("2bit stream: {symbols} symbols, {pad} pad pairs");
    writer.finish()
}

pub fn decode(encoded: &[u8]) -> Result<String> {
    if encoded.is_empty() {
        return Err(CodecError::malformed(Tier::TwoBit, "empty stream"));
    }
    let alphabet = &DNA_2BIT_ALPHABET;
    let mut reader = BitReader::new(encoded);

    let tag = reader.read_bits(TAG_BITS).unwrap_or_default();
    if tag != TAG_2BIT {
        return Err(CodecError::malformed(
            Tier::TwoBit,
            format!("wrong tag in header (found {tag:02b}, expected {TAG_2BIT:02b})"),
        ));
    }

    let pad_bits = 2 * reader.read_bits(PAD_COUNT_BITS).unwrap_or_default() as usize;
    let total = reader.len_bits();
    if HEADER_BITS + pad_bits > total {
        return Err(CodecError::malformed(
            Tier::TwoBit,
            format!("header declares {pad_bits} padding bits but the stream holds only {total} bits"),
        ));
    }

    let payload_end = total - pad_bits;
    if !reader.bits_are_zero(payload_end, total) {
        return Err(CodecError::malformed(
            Tier::TwoBit,
            "non-zero padding bits after the payload",
        ));
    }

    let mut decoded = String::with_capacity((payload_end - HEADER_BITS) / 2);
    while reader.position() < payload_end {
        let code = reader
            .read_bits(alphabet.bits_per_symbol)
            .ok_or_else(|| CodecError::malformed(Tier::TwoBit, "truncated payload"))?;
        let symbol = alphabet.decode_code(code).ok_or_else(|| {
            CodecError::malformed(Tier::TwoBit, format!("invalid 2-bit code {code:02b}"))
        })?;
        decoded.push(symbol);
    }
    Ok(decoded)
}
