use clap::{Arg, Command};

pub use nbitseq_core::consts::QUALITY_CMD;

pub fn create_quality_cli() -> Command {
    Command::new(QUALITY_CMD)
        .about("Run-length encode a quality string. Prints the record as JSON followed by its compact byte form in hex.")
        .arg(Arg::new("quality").required(true).help("ASCII quality string"))
        .arg(
            Arg::new("ascii-base")
                .long("ascii-base")
                .short('b')
                .required(false)
                .value_parser(clap::value_parser!(u32))
                .default_value("33")
                .help("ASCII offset of the quality scores (33 for Phred+33, 64 for Phred+64)"),
        )
}
