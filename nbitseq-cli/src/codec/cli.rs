use clap::{Arg, Command};

pub use nbitseq_core::consts::{DECODE_CMD, ENCODE_CMD, INSPECT_CMD};

fn tier_arg() -> Arg {
    Arg::new("tier")
        .long("tier")
        .short('t')
        .help("Tier to use: 2bit, 3bit or 4bit")
}

pub fn create_encode_cli() -> Command {
    Command::new(ENCODE_CMD)
        .about("Encode a nucleotide sequence with the smallest tier that holds it. Prints the tier and the bytes in hex.")
        .arg(
            Arg::new("sequence")
                .required(true)
                .help("Nucleotide sequence (IUPAC letters, '-' or '.' for gaps)"),
        )
        .arg(tier_arg().help("Force a tier instead of picking the minimal one"))
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file with encoding options"),
        )
}

pub fn create_decode_cli() -> Command {
    Command::new(DECODE_CMD)
        .about("Decode a hex encoded stream back to a sequence.")
        .arg(Arg::new("hex").required(true).help("Encoded bytes in hex"))
        .arg(tier_arg().help("Decode with this tier instead of reading the stream tag"))
}

pub fn create_inspect_cli() -> Command {
    Command::new(INSPECT_CMD)
        .about("Show the tier, size and bit layout of a hex encoded stream.")
        .arg(Arg::new("hex").required(true).help("Encoded bytes in hex"))
}
