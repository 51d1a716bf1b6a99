//! A sequence and its optional quality kept in encoded form.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::alphabet::{Tier, normalize};
use crate::config::CodecConfig;
use crate::dispatch;
use crate::errors::{CodecError, Result};
use crate::quality::{EncodedQuality, decode_quality, decode_quality_into_scores, encode_quality};

/// An encoded sequence with its quality scores and header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedRecord {
    pub tier: Tier,
    pub encoded_sequence: Vec<u8>,
    pub encoded_quality: Option<EncodedQuality>,
    pub header: Option<String>,
    pub ascii_base: u32,
}

impl EncodedRecord {
    ///
    /// Encode a sequence and, when given, its quality string.
    ///
    /// # Arguments
    /// - `sequence` - nucleotide sequence, any case, line breaks allowed
    /// - `quality` - one quality character per symbol of the normalized sequence
    /// - `header` - record identifier used by FASTA/FASTQ output
    /// - `config` - forced tier and quality ASCII base
    ///
    pub fn from_sequence(
        sequence: &str,
        quality: Option<&str>,
        header: Option<&str>,
        config: &CodecConfig,
    ) -> Result<Self> {
        let (tier, encoded_sequence) = dispatch::encode(sequence, config.tier)?;

        let encoded_quality = match quality {
            Some(quality) => {
                let expected = normalize(sequence).chars().count();
                let encoded = encode_quality(quality, config.ascii_base)?;
                encoded.check_length(expected)?;
                Some(encoded)
            }
            None => None,
        };

        Ok(EncodedRecord {
            tier,
            encoded_sequence,
            encoded_quality,
            header: header.map(str::to_string),
            ascii_base: config.ascii_base,
        })
    }

    pub fn sequence(&self) -> Result<String> {
        dispatch::decode(&self.encoded_sequence, Some(self.tier))
    }

    pub fn quality(&self) -> Result<Option<String>> {
        self.encoded_quality
            .as_ref()
            .map(|encoded| decode_quality(encoded, self.ascii_base))
            .transpose()
    }

    pub fn quality_scores(&self) -> Result<Option<Vec<i32>>> {
        self.encoded_quality
            .as_ref()
            .map(decode_quality_into_scores)
            .transpose()
    }

    /// Mean quality score. `None` without quality or when the quality is empty.
    pub fn average_quality(&self) -> Option<f64> {
        self.encoded_quality.as_ref().and_then(EncodedQuality::average)
    }

    /// The header, or a hex digest of the encoded bytes when there is none.
    pub fn id(&self) -> String {
        match &self.header {
            Some(header) => header.clone(),
            None => format!("{:016x}", fxhash::hash64(&self.encoded_sequence)),
        }
    }

    pub fn to_fasta(&self) -> Result<String> {
        Ok(format!(">{}\n{}", self.id(), self.sequence()?))
    }

    pub fn to_fastq(&self) -> Result<String> {
        let quality = self.quality()?.ok_or(CodecError::MissingQuality)?;
        Ok(format!("@{}\n{}\n+\n{}", self.id(), self.sequence()?, quality))
    }
}

impl Display for EncodedRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = self.sequence().and_then(|sequence| {
            Ok(match self.quality()? {
                Some(quality) => format!("{sequence}\t{quality}"),
                None => sequence,
            })
        });
        match rendered {
            Ok(text) => write!(f, "{text}"),
            Err(e) => write!(f, "{e}"),
        }
    }
}
