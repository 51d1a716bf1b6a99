//! Baseline + run-length encoding of ASCII quality strings.
//!
//! Each character is turned into a score (`char - ascii_base`). The minimum
//! score becomes the baseline, every score is stored as its distance from the
//! baseline, and equal consecutive distances collapse into one run.
//!
//! ```rust
//! use nbitseq_core::quality::{decode_quality, encode_quality};
//!
//! let encoded = encode_quality("IIIIHHHH", 33).unwrap();
//! assert_eq!(encoded.baseline, 39);
//! assert_eq!(encoded.runs.len(), 2);
//! assert_eq!(decode_quality(&encoded, 33).unwrap(), "IIIIHHHH");
//! ```

use serde::{Deserialize, Serialize};

use crate::consts::MAX_COMPACT_RUN;
use crate::errors::{CodecError, Result};

/// A stretch of consecutive scores sharing the same distance from the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityRun {
    pub delta: u32,
    pub run_length: usize,
}

/// Run-length encoded quality scores.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncodedQuality {
    /// Minimum score of the original string (0 for an empty string).
    pub baseline: i32,
    pub runs: Vec<QualityRun>,
}

impl EncodedQuality {
    /// Number of scores the runs expand to.
    pub fn len(&self) -> usize {
        self.runs.iter().map(|run| run.run_length).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Checks that every run is non-empty, that at least one run sits on the
    /// baseline, and that every score fits an `i32`.
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.runs.iter().position(|run| run.run_length == 0) {
            return Err(CodecError::InvalidQualityRecord(format!(
                "run {index} has length 0"
            )));
        }
        if !self.runs.is_empty() && !self.runs.iter().any(|run| run.delta == 0) {
            return Err(CodecError::InvalidQualityRecord(format!(
                "no run sits on the baseline {}",
                self.baseline
            )));
        }
        for run in &self.runs {
            score_of(self.baseline, run.delta)?;
        }
        Ok(())
    }

    /// Checks that the runs cover exactly `expected` scores.
    pub fn check_length(&self, expected: usize) -> Result<()> {
        let len = self.len();
        if len != expected {
            return Err(CodecError::InvalidQualityRecord(format!(
                "runs cover {len} scores, expected {expected}"
            )));
        }
        Ok(())
    }

    /// Mean score, or `None` when there are no scores.
    pub fn average(&self) -> Option<f64> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        let total: f64 = self
            .runs
            .iter()
            .map(|run| (self.baseline as f64 + run.delta as f64) * run.run_length as f64)
            .sum();
        Some(total / len as f64)
    }

    /// Compact form: one `(run_length, delta)` byte pair per run.
    ///
    /// Runs longer than 255 are split across several pairs. The baseline is
    /// not part of the output and must be stored alongside it.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.validate()?;

        let mut bytes = Vec::with_capacity(self.runs.len() * 2);
        for run in &self.runs {
            let delta = u8::try_from(run.delta).map_err(|_| {
                CodecError::InvalidQualityRecord(format!(
                    "delta {} does not fit the compact byte form",
                    run.delta
                ))
            })?;

            let mut left = run.run_length;
            while left > 0 {
                let count = left.min(MAX_COMPACT_RUN);
                bytes.push(count as u8);
                bytes.push(delta);
                left -= count;
            }
        }
        Ok(bytes)
    }

    /// Inverse of [`EncodedQuality::to_bytes`]. Split runs are merged back.
    pub fn from_bytes(baseline: i32, bytes: &[u8]) -> Result<Self> {
        if bytes.len() % 2 != 0 {
            return Err(CodecError::InvalidQualityRecord(format!(
                "compact quality holds {} bytes, expected (run_length, delta) pairs",
                bytes.len()
            )));
        }

        let mut runs: Vec<QualityRun> = Vec::with_capacity(bytes.len() / 2);
        for pair in bytes.chunks_exact(2) {
            let (count, delta) = (pair[0] as usize, pair[1] as u32);
            if count == 0 {
                return Err(CodecError::InvalidQualityRecord(
                    "compact quality holds a run of length 0".to_string(),
                ));
            }
            match runs.last_mut() {
                Some(run) if run.delta == delta => run.run_length += count,
                _ => runs.push(QualityRun {
                    delta,
                    run_length: count,
                }),
            }
        }

        let encoded = EncodedQuality { baseline, runs };
        encoded.validate()?;
        Ok(encoded)
    }
}

fn score_of(baseline: i32, delta: u32) -> Result<i32> {
    i32::try_from(baseline as i64 + delta as i64).map_err(|_| {
        CodecError::InvalidQualityRecord(format!(
            "baseline {baseline} plus delta {delta} overflows a score"
        ))
    })
}

/// Encodes a quality string.
///
/// Fails with [`CodecError::InvalidQualityRecord`] when a character minus
/// `ascii_base` does not fit an `i32` score.
///
/// # Arguments
///
/// * `quality` - Quality scores string.
/// * `ascii_base` - ASCII offset of the scores (33 for Illumina 1.8+).
pub fn encode_quality(quality: &str, ascii_base: u32) -> Result<EncodedQuality> {
    let scores = quality
        .chars()
        .map(|c| {
            i32::try_from(u32::from(c) as i64 - ascii_base as i64).map_err(|_| {
                CodecError::InvalidQualityRecord(format!(
                    "character {c:?} with ASCII base {ascii_base} does not fit a score"
                ))
            })
        })
        .collect::<Result<Vec<i32>>>()?;
    let baseline = scores.iter().copied().min().unwrap_or(0);

    let mut runs: Vec<QualityRun> = Vec::new();
    for score in scores {
        // both sides are i32, so the distance fits a u32
        let delta = (score as i64 - baseline as i64) as u32;
        match runs.last_mut() {
            Some(run) if run.delta == delta => run.run_length += 1,
            _ => runs.push(QualityRun {
                delta,
                run_length: 1,
            }),
        }
    }

    Ok(EncodedQuality { baseline, runs })
}

/// Expands the runs into integer scores.
pub fn decode_quality_into_scores(encoded: &EncodedQuality) -> Result<Vec<i32>> {
    encoded.validate()?;

    let mut scores = Vec::with_capacity(encoded.len());
    for run in &encoded.runs {
        let score = score_of(encoded.baseline, run.delta)?;
        scores.extend(std::iter::repeat_n(score, run.run_length));
    }
    Ok(scores)
}

/// Expands the runs back into a quality string.
pub fn decode_quality(encoded: &EncodedQuality, ascii_base: u32) -> Result<String> {
    decode_quality_into_scores(encoded)?
        .into_iter()
        .map(|score| {
            u32::try_from(score as i64 + ascii_base as i64)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| {
                    CodecError::InvalidQualityRecord(format!(
                        "score {score} with ASCII base {ascii_base} is not a character"
                    ))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(delta: u32, run_length: usize) -> QualityRun {
        QualityRun { delta, run_length }
    }

    #[test]
    fn test_encode_known_string() {
        let encoded = encode_quality("IIIIHHHH", 33).unwrap();
        assert_eq!(
            encoded,
            EncodedQuality {
                baseline: 39,
                runs: vec![run(1, 4), run(0, 4)],
            }
        );
        assert_eq!(encoded.len(), 8);
        assert_eq!(decode_quality(&encoded, 33).unwrap(), "IIIIHHHH");
        assert_eq!(
            decode_quality_into_scores(&encoded).unwrap(),
            vec![40, 40, 40, 40, 39, 39, 39, 39]
        );
    }

    #[test]
    fn test_runs_are_maximal_and_ordered() {
        let encoded = encode_quality("!!##!#", 33).unwrap();
        assert_eq!(encoded.baseline, 0);
        assert_eq!(
            encoded.runs,
            vec![run(0, 2), run(2, 2), run(0, 1), run(2, 1)]
        );
    }

    #[test]
    fn test_empty_string() {
        let encoded = encode_quality("", 33).unwrap();
        assert_eq!(encoded, EncodedQuality::default());
        assert!(encoded.is_empty());
        assert_eq!(decode_quality(&encoded, 33).unwrap(), "");
        assert_eq!(encoded.average(), None);
    }

    #[rstest]
    #[case("IIIIIIIIIIFFFFFFFF@@@@@@@@@55555", 33)]
    #[case("hhhhgggfffBBBB", 64)]
    #[case(" !\"#", 33)] // a space scores below the base
    #[case("~", 33)]
    fn test_round_trip(#[case] quality: &str, #[case] ascii_base: u32) {
        let encoded = encode_quality(quality, ascii_base).unwrap();
        assert!(encoded.runs.iter().any(|run| run.delta == 0));
        assert_eq!(encoded.len(), quality.len());
        assert_eq!(decode_quality(&encoded, ascii_base).unwrap(), quality);
    }

    #[rstest]
    #[case(3_000_000_000)]
    #[case(u32::MAX)]
    fn test_rejects_ascii_base_beyond_score_range(#[case] ascii_base: u32) {
        assert!(matches!(
            encode_quality("A", ascii_base),
            Err(CodecError::InvalidQualityRecord(_))
        ));
    }

    #[rstest]
    #[case(1000, -935)]
    #[case(0x8000_0000, -2_147_483_583)]
    fn test_large_ascii_base_within_score_range_round_trips(
        #[case] ascii_base: u32,
        #[case] baseline: i32,
    ) {
        let encoded = encode_quality("AB", ascii_base).unwrap();
        assert_eq!(encoded.baseline, baseline);
        assert_eq!(encoded.runs, vec![run(0, 1), run(1, 1)]);
        assert_eq!(decode_quality(&encoded, ascii_base).unwrap(), "AB");
    }

    #[test]
    fn test_average() {
        let encoded = encode_quality("IIIIHHHH", 33).unwrap();
        assert_eq!(encoded.average(), Some(39.5));
    }

    #[test]
    fn test_rejects_empty_run() {
        let encoded = EncodedQuality {
            baseline: 10,
            runs: vec![run(0, 3), run(1, 0)],
        };
        assert!(matches!(
            decode_quality_into_scores(&encoded),
            Err(CodecError::InvalidQualityRecord(_))
        ));
    }

    #[test]
    fn test_rejects_runs_above_baseline_only() {
        let encoded = EncodedQuality {
            baseline: 10,
            runs: vec![run(2, 3)],
        };
        assert!(encoded.validate().is_err());
    }

    #[test]
    fn test_rejects_unrepresentable_character() {
        let encoded = EncodedQuality {
            baseline: -40,
            runs: vec![run(0, 1)],
        };
        assert!(decode_quality_into_scores(&encoded).is_ok());
        assert!(decode_quality(&encoded, 33).is_err());
    }

    #[test]
    fn test_check_length() {
        let encoded = encode_quality("IIII", 33).unwrap();
        assert!(encoded.check_length(4).is_ok());
        assert!(matches!(
            encoded.check_length(5),
            Err(CodecError::InvalidQualityRecord(_))
        ));
    }

    #[test]
    fn test_compact_bytes_split_and_merge_long_runs() {
        let quality: String = std::iter::repeat_n('I', 600).chain("##".chars()).collect();
        let encoded = encode_quality(&quality, 33).unwrap();
        let bytes = encoded.to_bytes().unwrap();
        assert_eq!(bytes, vec![255, 38, 255, 38, 90, 38, 2, 0]);

        let restored = EncodedQuality::from_bytes(encoded.baseline, &bytes).unwrap();
        assert_eq!(restored, encoded);
        assert_eq!(decode_quality(&restored, 33).unwrap(), quality);
    }

    #[rstest]
    #[case(vec![4])]
    #[case(vec![0, 0])]
    #[case(vec![3, 5])] // no run on the baseline
    fn test_compact_bytes_rejects_malformed(#[case] bytes: Vec<u8>) {
        assert!(matches!(
            EncodedQuality::from_bytes(0, &bytes),
            Err(CodecError::InvalidQualityRecord(_))
        ));
    }

    #[test]
    fn test_compact_bytes_rejects_wide_delta() {
        let encoded = EncodedQuality {
            baseline: 0,
            runs: vec![run(0, 1), run(300, 1)],
        };
        assert!(encoded.to_bytes().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let encoded = encode_quality("IIIIHHHH", 33).unwrap();
        let json = serde_json::to_string(&encoded).unwrap();
        let restored: EncodedQuality = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, encoded);
    }
}
