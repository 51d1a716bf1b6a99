//! 4-bit tier: the full IUPAC alphabet plus gap.
//!
//! Layout:
//! ```text
//! odd length:  [2b TAG=11][00][4-bit symbols...]
//! even length: [2b TAG=11][11][0000][4-bit symbols...]
//! ```
//! The payload is `4N` bits, which is 4 mod 8 for odd `N` and 0 mod 8 for
//! even `N`, so the header width alone byte-aligns the stream.
//!
//! From LEFT to RIGHT each symbol is a presence mask over A, C, G and T
//! (included=1). N is `1111` and gap is `0000`.

use log::trace;

use crate::alphabet::{DNA_4BIT_ALPHABET, Tier, normalize};
use crate::bits::{BitReader, BitWriter};
use crate::consts::{EVEN_FILLER_BITS_4BIT, EVEN_SUFFIX_4BIT, ODD_SUFFIX_4BIT, TAG_4BIT, TAG_BITS};
use crate::errors::{CodecError, Result};

const SYMBOL_BITS: usize = Tier::FourBit.bits_per_symbol();
const SUFFIX_BITS: usize = 2;

/// Normalizes and encodes a sequence over the full IUPAC alphabet.
pub fn encode(sequence: &str) -> Result<Vec<u8>> {
    encode_normalized(&normalize(sequence))
}

pub(crate) fn encode_normalized(sequence: &str) -> Result<Vec<u8>> {
    let alphabet = &DNA_4BIT_ALPHABET;
    let symbols = sequence.chars().count();
    let odd = symbols % 2 == 1;

    let mut writer = BitWriter::with_capacity(8 + SYMBOL_BITS * symbols);
    writer.push_bits(TAG_4BIT, TAG_BITS);
    if odd {
        writer.push_bits(ODD_SUFFIX_4BIT, SUFFIX_BITS);
    } else {
        writer.push_bits(EVEN_SUFFIX_4BIT, SUFFIX_BITS);
        writer.push_zeros(EVEN_FILLER_BITS_4BIT);
    }
    for (position, symbol) in sequence.chars().enumerate() {
        writer.push_bits(alphabet.encode_symbol(symbol, position)?, SYMBOL_BITS);
    }

    trace!(
        "4bit stream: {symbols} symbols, {} header",
        if odd { "odd" } else { "even" }
    );
    writer.finish()
}

pub fn decode(encoded: &[u8]) -> Result<String> {
    if encoded.is_empty() {
        return Err(CodecError::malformed(Tier::FourBit, "empty stream"));
    }
    let alphabet = &DNA_4BIT_ALPHABET;
    let mut reader = BitReader::new(encoded);

    let tag = reader.read_bits(TAG_BITS).unwrap_or_default();
    if tag != TAG_4BIT {
        return Err(CodecError::malformed(
            Tier::FourBit,
            format!("wrong tag in header (found {tag:02b}, expected {TAG_4BIT:02b})"),
        ));
    }

    // Checks if odd or even to see how much header to skip
    let odd = match reader.read_bits(SUFFIX_BITS).unwrap_or_default() {
        ODD_SUFFIX_4BIT => true,
        EVEN_SUFFIX_4BIT => {
            let filler = reader.read_bits(EVEN_FILLER_BITS_4BIT).unwrap_or_default();
            if filler != 0 {
                return Err(CodecError::malformed(
                    Tier::FourBit,
                    format!("even-length header ends in {filler:04b}, expected 0000"),
                ));
            }
            false
        }
        other => {
            return Err(CodecError::malformed(
                Tier::FourBit,
                format!("unknown header suffix {other:02b} (expected 00 or 11)"),
            ));
        }
    };

    let payload_bits = reader.remaining();
    if payload_bits % SYMBOL_BITS != 0 {
        return Err(CodecError::malformed(
            Tier::FourBit,
            format!("bitstring length after header is not divisible by 4 ({payload_bits} bits)"),
        ));
    }
    let symbols = payload_bits / SYMBOL_BITS;
    if (symbols % 2 == 1) != odd {
        return Err(CodecError::malformed(
            Tier::FourBit,
            format!(
                "payload of {symbols} symbols contradicts the {} header",
                if odd { "odd" } else { "even" }
            ),
        ));
    }

    let mut decoded = String::with_capacity(symbols);
    while let Some(code) = reader.read_bits(SYMBOL_BITS) {
        let symbol = alphabet.decode_code(code).ok_or_else(|| {
            CodecError::malformed(Tier::FourBit, format!("invalid 4-bit symbol {code:04b}"))
        })?;
        decoded.push(symbol);
    }
    Ok(decoded)
}
