mod codec;
mod quality;
mod record;
mod utils;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "nbitseq";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Compact, self-describing 2-bit, 3-bit and 4-bit nucleotide encodings with run-length quality compression.")
        .subcommand_required(true)
        .subcommand(codec::cli::create_encode_cli())
        .subcommand(codec::cli::create_decode_cli())
        .subcommand(codec::cli::create_inspect_cli())
        .subcommand(quality::cli::create_quality_cli())
        .subcommand(record::cli::create_record_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SEQUENCE CODECS
        //
        Some((codec::cli::ENCODE_CMD, matches)) => {
            codec::handlers::run_encode(matches)?;
        }
        Some((codec::cli::DECODE_CMD, matches)) => {
            codec::handlers::run_decode(matches)?;
        }
        Some((codec::cli::INSPECT_CMD, matches)) => {
            codec::handlers::run_inspect(matches)?;
        }

        //
        // QUALITY
        //
        Some((quality::cli::QUALITY_CMD, matches)) => {
            quality::handlers::run_quality(matches)?;
        }

        //
        // RECORDS
        //
        Some((record::cli::RECORD_CMD, matches)) => {
            record::handlers::run_record(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use nbitseq_core::Tier;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    #[case(&["nbitseq", "encode", "ACGTN"])]
    #[case(&["nbitseq", "encode", "ACGT", "--tier", "4bit"])]
    #[case(&["nbitseq", "decode", "61b0", "-t", "2bit"])]
    #[case(&["nbitseq", "inspect", "61b0"])]
    #[case(&["nbitseq", "quality", "IIII", "--ascii-base", "64"])]
    #[case(&["nbitseq", "record", "ACGT", "-q", "IIII", "--format", "fastq"])]
    fn test_parser_accepts(#[case] args: &[&str]) {
        assert!(build_parser().try_get_matches_from(args.to_vec()).is_ok());
    }

    #[rstest]
    #[case(&["nbitseq"])]
    #[case(&["nbitseq", "encode"])]
    #[case(&["nbitseq", "record", "ACGT", "--format", "sam"])]
    fn test_parser_rejects(#[case] args: &[&str]) {
        assert!(build_parser().try_get_matches_from(args.to_vec()).is_err());
    }

    #[rstest]
    fn test_tier_flag_reaches_config() {
        let matches = build_parser()
            .try_get_matches_from(["nbitseq", "encode", "ACGT", "--tier", "3"])
            .unwrap();
        let (_, matches) = matches.subcommand().unwrap();
        let config = utils::load_config(matches).unwrap();
        assert_eq!(config.tier, Some(Tier::ThreeBit));
        assert_eq!(config.ascii_base, 33);
    }
}
