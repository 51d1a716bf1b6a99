use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::ArgMatches;

use nbitseq_core::{CodecConfig, Tier};

/// Lowercase hex, two digits per byte.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parses hex text into bytes. Whitespace and a leading `0x` are ignored.
pub fn from_hex(text: &str) -> Result<Vec<u8>> {
    let text = text.trim();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    hex::decode(&digits).with_context(|| format!("Invalid hex input '{digits}'"))
}

/// Reads the optional `--tier` argument.
pub fn tier_arg(matches: &ArgMatches) -> Result<Option<Tier>> {
    match matches.get_one::<String>("tier") {
        Some(tier) => match Tier::from_str(tier) {
            Ok(tier) => Ok(Some(tier)),
            Err(err) => anyhow::bail!(err),
        },
        None => Ok(None),
    }
}

/// Builds the encoding options from `--config`, then lets `--tier` override the file.
pub fn load_config(matches: &ArgMatches) -> Result<CodecConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => CodecConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to read config file: {path}"))?,
        None => CodecConfig::default(),
    };

    if let Some(tier) = tier_arg(matches)? {
        config.tier = Some(tier);
    }

    Ok(config)
}
