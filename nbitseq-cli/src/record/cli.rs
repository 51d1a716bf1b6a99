use clap::{Arg, Command};

pub use nbitseq_core::consts::RECORD_CMD;

pub const FASTA_FORMAT: &str = "fasta";
pub const FASTQ_FORMAT: &str = "fastq";

pub fn create_record_cli() -> Command {
    Command::new(RECORD_CMD)
        .about("Encode a sequence with its quality and render it back as FASTA or FASTQ.")
        .arg(Arg::new("sequence").required(true).help("Nucleotide sequence"))
        .arg(
            Arg::new("quality")
                .long("quality")
                .short('q')
                .help("Quality string, one character per symbol"),
        )
        .arg(
            Arg::new("header")
                .long("header")
                .short('H')
                .help("Record identifier (defaults to a hash of the encoded bytes)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .short('f')
                .value_parser([FASTA_FORMAT, FASTQ_FORMAT])
                .default_value(FASTA_FORMAT)
                .help("Output format"),
        )
        .arg(
            Arg::new("tier")
                .long("tier")
                .short('t')
                .help("Force a tier: 2bit, 3bit or 4bit"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with encoding options"),
        )
}
