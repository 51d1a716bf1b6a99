use anyhow::{Context, Result};
use clap::ArgMatches;
use log::debug;

use nbitseq_core::{CodecConfig, EncodedRecord};

use super::cli::{FASTA_FORMAT, FASTQ_FORMAT};
use crate::utils::{load_config, to_hex};

pub fn run_record(matches: &ArgMatches) -> Result<()> {
    let sequence = matches
        .get_one::<String>("sequence")
        .context("A sequence is required.")?;
    let quality = matches.get_one::<String>("quality").map(String::as_str);
    let header = matches.get_one::<String>("header").map(String::as_str);

    let default_format = FASTA_FORMAT.to_string();
    let format = matches
        .get_one::<String>("format")
        .unwrap_or(&default_format);

    let config = load_config(matches)?;

    println!("{}", render_record(sequence, quality, header, format, &config)?);

    Ok(())
}

pub fn render_record(
    sequence: &str,
    quality: Option<&str>,
    header: Option<&str>,
    format: &str,
    config: &CodecConfig,
) -> Result<String> {
    let record = EncodedRecord::from_sequence(sequence, quality, header, config)?;
    debug!(
        "Record {} stored as {} ({})",
        record.id(),
        record.tier,
        to_hex(&record.encoded_sequence)
    );

    let rendered = match format {
        FASTA_FORMAT => record.to_fasta()?,
        FASTQ_FORMAT => record
            .to_fastq()
            .context("FASTQ output needs --quality")?,
        other => anyhow::bail!("Unknown output format supplied: {}", other),
    };

    Ok(rendered)
}
