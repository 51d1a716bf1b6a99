use thiserror::Error;

use crate::alphabet::Tier;

/// Error type for nbitseq encode/decode operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// A character falls outside the alphabet of the tier being encoded.
    #[error("Unsupported symbol {symbol:?} at position {position} for the {tier} alphabet")]
    UnsupportedSymbol {
        symbol: char,
        position: usize,
        tier: Tier,
    },

    /// The byte buffer is not a valid stream for the tier it claims to be.
    #[error("Malformed stream: {0}")]
    MalformedStream(String),

    /// A run-length quality record is inconsistent or cannot be expanded.
    #[error("Invalid quality record: {0}")]
    InvalidQualityRecord(String),

    /// FASTQ output was requested for a record that carries no quality.
    #[error("No quality information attached to this record")]
    MissingQuality,
}

impl CodecError {
    pub(crate) fn malformed(tier: Tier, reason: impl std::fmt::Display) -> Self {
        CodecError::MalformedStream(format!("{tier} decoder: {reason}"))
    }
}

/// Result type alias for nbitseq operations.
pub type Result<T> = std::result::Result<T, CodecError>;
