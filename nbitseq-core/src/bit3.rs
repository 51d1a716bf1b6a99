//! 3-bit tier: A, C, G, T, N and gap.
//!
//! Layout:
//! ```text
//! [2b TAG=10][3-bit symbols...][0..2 zero bits | STOP=010 + 0..4 zero bits]
//! ```
//! Fewer than three spare bits can never hold a symbol, so plain zeros
//! suffice. Three or more spare zeros would read back as gap symbols (`000`),
//! so the encoder writes the STOP sentinel first.

use log::trace;

use crate::alphabet::{DNA_3BIT_ALPHABET, Tier, normalize};
use crate::bits::{BitReader, BitWriter};
use crate::consts::{STOP_3BIT, TAG_3BIT, TAG_BITS};
use crate::errors::{CodecError, Result};

const SYMBOL_BITS: usize = Tier::ThreeBit.bits_per_symbol();

/// Normalizes and encodes a sequence over A, C, G, T, N, `-` and `.`.
pub fn encode(sequence: &str) -> Result<Vec<u8>> {
    encode_normalized(&normalize(sequence))
}

pub(crate) fn encode_normalized(sequence: &str) -> Result<Vec<u8>> {
    let alphabet = &DNA_3BIT_ALPHABET;

    let mut writer = BitWriter::with_capacity(TAG_BITS + SYMBOL_BITS * sequence.len() + 8);
    writer.push_bits(TAG_3BIT, TAG_BITS);
    for (position, symbol) in sequence.chars().enumerate() {
        writer.push_bits(alphabet.encode_symbol(symbol, position)?, SYMBOL_BITS);
    }

    let spare = (8 - writer.len_bits() % 8) % 8;
    if spare >= SYMBOL_BITS {
        writer.push_bits(STOP_3BIT, SYMBOL_BITS);
        writer.push_zeros(spare - SYMBOL_BITS);
        trace!("3bit stream: STOP sentinel plus {} zero bits", spare - SYMBOL_BITS);
    } else {
        writer.push_zeros(spare);
        trace!("3bit stream: {spare} zero bits, no sentinel");
    }
    writer.finish()
}

pub fn decode(encoded: &[u8]) -> Result<String> {
    if encoded.is_empty() {
        return Err(CodecError::malformed(Tier::ThreeBit, "empty stream"));
    }
    let alphabet = &DNA_3BIT_ALPHABET;
    let mut reader = BitReader::new(encoded);

    let tag = reader.read_bits(TAG_BITS).unwrap_or_default();
    if tag != TAG_3BIT {
        return Err(CodecError::malformed(
            Tier::ThreeBit,
            format!("wrong tag in header (found {tag:02b}, expected {TAG_3BIT:02b})"),
        ));
    }

    let mut decoded = String::with_capacity(reader.remaining() / SYMBOL_BITS);
    // Consume 3-bit symbols until STOP or until less than a full symbol is left
    while let Some(code) = reader.read_bits(SYMBOL_BITS) {
        if code == STOP_3BIT {
            if reader.remaining() >= 8 - SYMBOL_BITS {
                return Err(CodecError::malformed(
                    Tier::ThreeBit,
                    format!(
                        "STOP symbol at bit {} is not in the final byte",
                        reader.position() - SYMBOL_BITS
                    ),
                ));
            }
            if !reader.rest_is_zero() {
                return Err(CodecError::malformed(
                    Tier::ThreeBit,
                    "non-zero padding bits found after STOP symbol",
                ));
            }
            return Ok(decoded);
        }

        let symbol = alphabet.decode_code(code).ok_or_else(|| {
            CodecError::malformed(
                Tier::ThreeBit,
                format!(
                    "invalid 3-bit symbol {code:03b} at bit {}",
                    reader.position() - SYMBOL_BITS
                ),
            )
        })?;
        decoded.push(symbol);
    }

    if !reader.rest_is_zero() {
        return Err(CodecError::malformed(
            Tier::ThreeBit,
            "non-zero padding bits found at end of stream",
        ));
    }
    Ok(decoded)
}
