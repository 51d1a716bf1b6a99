//! Wire-format constants and command names shared by the library and the CLI.

// Stream tags (the two most significant bits of the first byte)

/// Tag of a 2-bit (A/C/G/T) stream.
pub const TAG_2BIT: u8 = 0b01;

/// Tag of a 3-bit (A/C/G/T/N/gap) stream.
pub const TAG_3BIT: u8 = 0b10;

/// Tag of a 4-bit (full IUPAC) stream.
pub const TAG_4BIT: u8 = 0b11;

/// Width of every stream tag, in bits.
pub const TAG_BITS: usize = 2;

// 2-bit layout

/// Width of the pad-count field that follows the 2-bit tag.
pub const PAD_COUNT_BITS: usize = 2;

// 3-bit layout

/// Reserved 3-bit code marking the start of trailing alignment bits.
///
/// It is never assigned to a symbol, so a decoder can stop on it without
/// mistaking the zero padding that follows for gap symbols.
pub const STOP_3BIT: u8 = 0b010;

// 4-bit layout

/// Header suffix (after the tag) of an odd-length 4-bit stream: `1100`.
pub const ODD_SUFFIX_4BIT: u8 = 0b00;

/// Header suffix (after the tag) of an even-length 4-bit stream: `11110000`.
pub const EVEN_SUFFIX_4BIT: u8 = 0b11;

/// Filler bits closing the even-length 4-bit header.
pub const EVEN_FILLER_BITS_4BIT: usize = 4;

// Quality

/// Default ASCII offset of quality strings (Phred+33, Illumina 1.8+ and Sanger).
pub const DEFAULT_ASCII_BASE: u32 = 33;

/// Largest ASCII offset accepted by [`crate::config::CodecConfig`].
pub const MAX_ASCII_BASE: u32 = 126;

/// Longest run (and largest delta) the compact quality byte form can hold.
pub const MAX_COMPACT_RUN: usize = u8::MAX as usize;

// Command-line interface command names

/// Subcommand encoding a sequence.
pub const ENCODE_CMD: &str = "encode";

/// Subcommand decoding a hex stream.
pub const DECODE_CMD: &str = "decode";

/// Subcommand printing the bit layout of a hex stream.
pub const INSPECT_CMD: &str = "inspect";

/// Subcommand run-length encoding a quality string.
pub const QUALITY_CMD: &str = "quality";

/// Subcommand rendering an encoded record as FASTA or FASTQ.
pub const RECORD_CMD: &str = "record";
