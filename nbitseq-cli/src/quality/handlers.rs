use anyhow::{Context, Result};
use clap::ArgMatches;

use nbitseq_core::consts::DEFAULT_ASCII_BASE;
use nbitseq_core::{CodecConfig, encode_quality};

use crate::utils::to_hex;

pub fn run_quality(matches: &ArgMatches) -> Result<()> {
    let quality = matches
        .get_one::<String>("quality")
        .context("A quality string is required.")?;

    let ascii_base = matches
        .get_one::<u32>("ascii-base")
        .copied()
        .unwrap_or(DEFAULT_ASCII_BASE);

    println!("{}", quality_report(quality, ascii_base)?);

    Ok(())
}

pub fn quality_report(quality: &str, ascii_base: u32) -> Result<String> {
    let config = CodecConfig {
        ascii_base,
        ..CodecConfig::default()
    };
    config.validate()?;

    let encoded = encode_quality(quality, config.ascii_base)?;
    let json = serde_json::to_string_pretty(&encoded)?;
    let compact = encoded.to_bytes()?;

    Ok(format!(
        "{json}\nbaseline\t{}\ncompact\t{}",
        encoded.baseline,
        to_hex(&compact)
    ))
}
