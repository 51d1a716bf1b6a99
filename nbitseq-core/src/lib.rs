//! # Self-describing nucleotide encodings
//!
//! Packs nucleotide sequences into one of three fixed-width bit encodings and
//! picks the smallest one able to hold every symbol of the input:
//!
//! - `2bit` - A, C, G, T
//! - `3bit` - A, C, G, T, N and gap (`-` or `.`)
//! - `4bit` - the full IUPAC alphabet plus gap
//!
//! Every encoded stream opens with a 2-bit tag naming its tier, so a decoder
//! needs nothing but the bytes. Quality strings are compressed separately as a
//! baseline plus run-length encoded deltas.
//!
//! # Module Structure
//!
//! - `alphabet` - tiers, per-tier code tables and the streaming `TierGuesser`
//! - `bits` - MSB-first bit writer/reader, `pack` and `unpack`
//! - `bit2`, `bit3`, `bit4` - the tier codecs
//! - `dispatch` - minimal tier selection and tag-based decoding
//! - `quality` - run-length quality encoding
//! - `record` - a sequence, quality and header kept together in encoded form
//! - `config` - TOML-backed encoding options
//!
//! # Example
//!
//! ```rust
//! use nbitseq_core::{Tier, decode, encode};
//!
//! let (tier, bytes) = encode("ACGTN", None).unwrap();
//! assert_eq!(tier, Tier::ThreeBit);
//! assert_eq!(decode(&bytes, None).unwrap(), "ACGTN");
//! ```

pub mod alphabet;
pub mod bit2;
pub mod bit3;
pub mod bit4;
pub mod bits;
pub mod config;
pub mod consts;
pub mod dispatch;
pub mod errors;
pub mod quality;
pub mod record;

// Re-export commonly used items at crate root for convenience
pub use alphabet::{
    Alphabet, Tier, TierGuesser, lookup_alphabet, minimal_tier_for, normalize,
    DNA_2BIT_ALPHABET, DNA_3BIT_ALPHABET, DNA_4BIT_ALPHABET,
};
pub use bits::{pack, unpack};
pub use config::{CodecConfig, ConfigError};
pub use dispatch::{choose_minimal_encoding, decode, detect_tier, encode};
pub use errors::{CodecError, Result};
pub use quality::{
    EncodedQuality, QualityRun, decode_quality, decode_quality_into_scores, encode_quality,
};
pub use record::EncodedRecord;
