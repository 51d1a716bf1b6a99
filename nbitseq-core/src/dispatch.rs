//! Tier selection on encode and tag-based routing on decode.

use log::debug;

use crate::alphabet::{Tier, TierGuesser, normalize};
use crate::errors::{CodecError, Result};
use crate::{bit2, bit3, bit4};

/// A tier's encoder: normalizes, validates and packs a sequence.
pub type EncodeFn = fn(&str) -> Result<Vec<u8>>;

/// A tier's decoder: unpacks a stream of that tier back to text.
pub type DecodeFn = fn(&[u8]) -> Result<String>;

/// The encode/decode pair of a tier.
pub fn codec_for(tier: Tier) -> (EncodeFn, DecodeFn) {
    match tier {
        Tier::TwoBit => (bit2::encode as EncodeFn, bit2::decode as DecodeFn),
        Tier::ThreeBit => (bit3::encode as EncodeFn, bit3::decode as DecodeFn),
        Tier::FourBit => (bit4::encode as EncodeFn, bit4::decode as DecodeFn),
    }
}

/// Returns the smallest tier whose alphabet holds every symbol of `sequence`.
///
/// Case is ignored and line breaks are skipped. Fails with
/// [`CodecError::UnsupportedSymbol`] naming the first symbol no tier accepts.
pub fn choose_minimal_encoding(sequence: &str) -> Result<Tier> {
    let mut guesser = TierGuesser::new();
    guesser.update(sequence)?;
    Ok(guesser.guess())
}

/// Encodes `sequence` with `tier`, or with the minimal tier when `tier` is `None`.
///
/// A forced tier is honored even when a smaller one would suffice.
pub fn encode(sequence: &str, tier: Option<Tier>) -> Result<(Tier, Vec<u8>)> {
    let sequence = normalize(sequence);

    let tier = match tier {
        Some(tier) => {
            debug!("Encoding {} symbols with requested tier {tier}", sequence.len());
            tier
        }
        None => {
            let tier = choose_minimal_encoding(&sequence)?;
            debug!("Encoding {} symbols with minimal tier {tier}", sequence.len());
            tier
        }
    };

    let encoded = match tier {
        Tier::TwoBit => bit2::encode_normalized(&sequence)?,
        Tier::ThreeBit => bit3::encode_normalized(&sequence)?,
        Tier::FourBit => bit4::encode_normalized(&sequence)?,
    };
    Ok((tier, encoded))
}

/// Reads the tier from the two leading bits of the first byte.
pub fn detect_tier(encoded: &[u8]) -> Result<Tier> {
    let first = encoded.first().ok_or_else(|| {
        CodecError::MalformedStream("empty stream has no tag to read".to_string())
    })?;
    let tag = first >> 6;
    Tier::from_tag(tag)
        .ok_or_else(|| CodecError::MalformedStream(format!("unknown or unsupported tag {tag:02b}")))
}

/// Decodes `encoded` with `tier`, or with the tier named by its tag when `tier` is `None`.
pub fn decode(encoded: &[u8], tier: Option<Tier>) -> Result<String> {
    let tier = match tier {
        Some(tier) => tier,
        None => {
            let tier = detect_tier(encoded)?;
            debug!("Detected {tier} stream of {} bytes", encoded.len());
            tier
        }
    };
    let (_, decoder) = codec_for(tier);
    decoder(encoded)
}
