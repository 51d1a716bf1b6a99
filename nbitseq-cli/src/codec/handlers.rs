use anyhow::{Context, Result};
use clap::ArgMatches;

use nbitseq_core::bits::format_bits;
use nbitseq_core::{Tier, decode, detect_tier, encode};

use crate::utils::{from_hex, load_config, tier_arg, to_hex};

pub fn run_encode(matches: &ArgMatches) -> Result<()> {
    let sequence = matches
        .get_one::<String>("sequence")
        .context("A sequence is required.")?;
    let config = load_config(matches)?;

    println!("{}", encode_line(sequence, config.tier)?);

    Ok(())
}

pub fn run_decode(matches: &ArgMatches) -> Result<()> {
    let hex = matches
        .get_one::<String>("hex")
        .context("Encoded hex input is required.")?;
    let tier = tier_arg(matches)?;

    println!("{}", decode_line(hex, tier)?);

    Ok(())
}

pub fn run_inspect(matches: &ArgMatches) -> Result<()> {
    let hex = matches
        .get_one::<String>("hex")
        .context("Encoded hex input is required.")?;

    println!("{}", inspect_report(hex)?);

    Ok(())
}

/// `{tier}\t{hex}` for an encoded sequence.
pub fn encode_line(sequence: &str, tier: Option<Tier>) -> Result<String> {
    let (tier, bytes) = encode(sequence, tier)?;
    Ok(format!("{tier}\t{}", to_hex(&bytes)))
}

pub fn decode_line(hex: &str, tier: Option<Tier>) -> Result<String> {
    let bytes = from_hex(hex)?;
    Ok(decode(&bytes, tier)?)
}

pub fn inspect_report(hex: &str) -> Result<String> {
    let bytes = from_hex(hex)?;
    let tier = detect_tier(&bytes)?;
    let sequence = decode(&bytes, Some(tier))?;

    Ok(format!(
        "tier\t{tier}\nbytes\t{}\nsymbols\t{}\nbits\t{}\nsequence\t{sequence}",
        bytes.len(),
        sequence.chars().count(),
        format_bits(&bytes),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("ACGT", None, "2bit\t61b0")]
    #[case("acgt", Some(Tier::FourBit), "4bit\tf08421")]
    #[case("N-", None, "3bit\t98")]
    fn test_encode_line(
        #[case] sequence: &str,
        #[case] tier: Option<Tier>,
        #[case] expected: &str,
    ) {
        assert_eq!(encode_line(sequence, tier).unwrap(), expected);
    }

    #[rstest]
    #[case("61b0", None, "ACGT")]
    #[case("f08421", None, "ACGT")]
    #[case("98", Some(Tier::ThreeBit), "N-")]
    fn test_decode_line(#[case] hex: &str, #[case] tier: Option<Tier>, #[case] expected: &str) {
        assert_eq!(decode_line(hex, tier).unwrap(), expected);
    }

    #[rstest]
    fn test_decode_line_reports_malformed_stream() {
        let err = decode_line("00", None).unwrap_err();
        assert!(err.to_string().contains("Malformed stream"));
    }

    #[rstest]
    fn test_inspect_report() {
        assert_eq!(
            inspect_report("a5dc").unwrap(),
            "tier\t3bit\nbytes\t2\nsymbols\t4\nbits\t10100101 11011100\nsequence\tACGT"
        );
    }
}
