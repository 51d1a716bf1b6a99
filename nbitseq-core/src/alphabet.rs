use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{CodecError, Result};

/// Marks a byte that has no code in a tier's encoding array.
const NO_CODE: u8 = 0xFF;

/// Marks a code that has no symbol in a tier's decoding array.
const NO_SYMBOL: u8 = 0;

// Presence bits over the four nucleotides, A in the most significant position.
const A: u8 = 0b1000;
const C: u8 = 0b0100;
const G: u8 = 0b0010;
const T: u8 = 0b0001;
const ANY: u8 = A | C | G | T;

const KETO: u8 = G | T;
const PYRIMIDINE: u8 = C | T;

/// Canonical base-attribute table.
///
/// Every symbol any tier accepts, paired with the set of nucleotides it may
/// stand for. All per-tier encoding and decoding arrays are derived from this
/// table at compile time. `-` precedes `.` so that the gap code decodes to `-`.
const BASE_ATTRIBUTES: [(u8, u8); 17] = [
    // gaps
    (b'-', 0),
    (b'.', 0),
    // single bases
    (b'A', A),
    (b'C', C),
    (b'G', G),
    (b'T', T),
    // two possible nucleotides
    (b'R', A | G),
    (b'Y', C | T),
    (b'S', G | C),
    (b'W', A | T),
    (b'K', G | T),
    (b'M', A | C),
    // three possible nucleotides
    (b'B', C | G | T),
    (b'D', A | G | T),
    (b'H', A | C | T),
    (b'V', A | C | G),
    // any nucleotide
    (b'N', ANY),
];

/// One of the three fixed-width nucleotide encodings.
///
/// Tiers are ordered by containment: every symbol valid in `TwoBit` is valid
/// in `ThreeBit`, and every symbol valid in `ThreeBit` is valid in `FourBit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// A, C, G, T
    #[serde(rename = "2bit")]
    TwoBit,
    /// A, C, G, T, N and gap
    #[serde(rename = "3bit")]
    ThreeBit,
    /// Full IUPAC alphabet plus gap
    #[serde(rename = "4bit")]
    FourBit,
}

impl Tier {
    /// All tiers, smallest first.
    pub const ALL: [Tier; 3] = [Tier::TwoBit, Tier::ThreeBit, Tier::FourBit];

    /// Returns the number of bits used per symbol for this tier
    pub const fn bits_per_symbol(&self) -> usize {
        match self {
            Tier::TwoBit => 2,
            Tier::ThreeBit => 3,
            Tier::FourBit => 4,
        }
    }

    /// The 2-bit tag that opens every stream of this tier.
    pub const fn tag(&self) -> u8 {
        match self {
            Tier::TwoBit => crate::consts::TAG_2BIT,
            Tier::ThreeBit => crate::consts::TAG_3BIT,
            Tier::FourBit => crate::consts::TAG_4BIT,
        }
    }

    /// Maps a 2-bit stream tag back to its tier. `00` belongs to no tier.
    pub const fn from_tag(tag: u8) -> Option<Tier> {
        match tag {
            crate::consts::TAG_2BIT => Some(Tier::TwoBit),
            crate::consts::TAG_3BIT => Some(Tier::ThreeBit),
            crate::consts::TAG_4BIT => Some(Tier::FourBit),
            _ => None,
        }
    }

    pub fn alphabet(&self) -> &'static Alphabet {
        lookup_alphabet(self)
    }

    /// Whether `symbol` (case-insensitive) belongs to this tier's alphabet.
    pub fn supports(&self, symbol: char) -> bool {
        self.alphabet().code_of(symbol.to_ascii_uppercase()).is_some()
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::TwoBit => write!(f, "2bit"),
            Tier::ThreeBit => write!(f, "3bit"),
            Tier::FourBit => write!(f, "4bit"),
        }
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "2bit" | "2" | "two_bit" => Ok(Tier::TwoBit),
            "3bit" | "3" | "three_bit" => Ok(Tier::ThreeBit),
            "4bit" | "4" | "four_bit" => Ok(Tier::FourBit),
            _ => Err(format!(
                "Unknown tier '{s}'. Valid options are '2bit', '3bit' or '4bit'"
            )),
        }
    }
}

/// Represents a tier's alphabet with its encoding and decoding arrays.
pub struct Alphabet {
    pub tier: Tier,
    pub encoding_array: &'static [u8; 256],
    pub decoding_array: &'static [u8; 16],
    pub bits_per_symbol: usize,
}

impl Alphabet {
    /// Symbols accepted by this alphabet (uppercase, both gap characters included).
    pub fn symbols(&self) -> Vec<char> {
        BASE_ATTRIBUTES
            .iter()
            .filter(|(symbol, _)| self.encoding_array[*symbol as usize] != NO_CODE)
            .map(|(symbol, _)| *symbol as char)
            .collect()
    }

    /// Code of an uppercase symbol, or `None` when the alphabet lacks it.
    pub fn code_of(&self, symbol: char) -> Option<u8> {
        if !symbol.is_ascii() {
            return None;
        }
        match self.encoding_array[symbol as usize] {
            NO_CODE => None,
            code => Some(code),
        }
    }

    /// Encodes one uppercase symbol found at `position` of a normalized sequence.
    pub fn encode_symbol(&self, symbol: char, position: usize) -> Result<u8> {
        self.code_of(symbol).ok_or(CodecError::UnsupportedSymbol {
            symbol,
            position,
            tier: self.tier,
        })
    }

    /// Symbol for `code`. The shared gap code always yields `-`.
    pub fn decode_code(&self, code: u8) -> Option<char> {
        match self.decoding_array.get(code as usize) {
            Some(&NO_SYMBOL) | None => None,
            Some(&symbol) => Some(symbol as char),
        }
    }
}

const fn tier_accepts(tier: Tier, mask: u8) -> bool {
    match tier {
        Tier::TwoBit => mask.count_ones() == 1,
        Tier::ThreeBit => mask.count_ones() == 1 || mask == ANY || mask == 0,
        Tier::FourBit => true,
    }
}

/// Code of a presence mask in the given tier.
///
/// - 2-bit: (keto, pyrimidine), so A=00, C=01, G=10, T=11.
/// - 3-bit: (concrete, keto, pyrimidine) for single bases, N=011, gap=000.
///   `010` is the stop sentinel and `001` stays unassigned.
/// - 4-bit: the presence mask itself.
const fn tier_code(tier: Tier, mask: u8) -> u8 {
    let keto = ((mask & KETO) != 0) as u8;
    let pyrimidine = ((mask & PYRIMIDINE) != 0) as u8;
    match tier {
        Tier::TwoBit => (keto << 1) | pyrimidine,
        Tier::ThreeBit => {
            if mask.count_ones() == 1 {
                0b100 | (keto << 1) | pyrimidine
            } else if mask == ANY {
                0b011
            } else {
                0b000
            }
        }
        Tier::FourBit => mask,
    }
}

const fn build_encoding_array(tier: Tier) -> [u8; 256] {
    let mut arr = [NO_CODE; 256];
    let mut i = 0;
    while i < BASE_ATTRIBUTES.len() {
        let (symbol, mask) = BASE_ATTRIBUTES[i];
        if tier_accepts(tier, mask) {
            arr[symbol as usize] = tier_code(tier, mask);
        }
        i += 1;
    }
    arr
}

const fn build_decoding_array(tier: Tier) -> [u8; 16] {
    let mut arr = [NO_SYMBOL; 16];
    let mut i = 0;
    while i < BASE_ATTRIBUTES.len() {
        let (symbol, mask) = BASE_ATTRIBUTES[i];
        let code = tier_code(tier, mask) as usize;
        // '.' shares the gap code with '-', which is already in place
        if tier_accepts(tier, mask) && arr[code] == NO_SYMBOL {
            arr[code] = symbol;
        }
        i += 1;
    }
    arr
}

static DNA_2BIT_ENCODING_ARRAY: [u8; 256] = build_encoding_array(Tier::TwoBit);
static DNA_2BIT_DECODING_ARRAY: [u8; 16] = build_decoding_array(Tier::TwoBit);
static DNA_3BIT_ENCODING_ARRAY: [u8; 256] = build_encoding_array(Tier::ThreeBit);
static DNA_3BIT_DECODING_ARRAY: [u8; 16] = build_decoding_array(Tier::ThreeBit);
static DNA_4BIT_ENCODING_ARRAY: [u8; 256] = build_encoding_array(Tier::FourBit);
static DNA_4BIT_DECODING_ARRAY: [u8; 16] = build_decoding_array(Tier::FourBit);

pub static DNA_2BIT_ALPHABET: Alphabet = Alphabet {
    tier: Tier::TwoBit,
    bits_per_symbol: Tier::TwoBit.bits_per_symbol(),
    encoding_array: &DNA_2BIT_ENCODING_ARRAY,
    decoding_array: &DNA_2BIT_DECODING_ARRAY,
};

pub static DNA_3BIT_ALPHABET: Alphabet = Alphabet {
    tier: Tier::ThreeBit,
    bits_per_symbol: Tier::ThreeBit.bits_per_symbol(),
    encoding_array: &DNA_3BIT_ENCODING_ARRAY,
    decoding_array: &DNA_3BIT_DECODING_ARRAY,
};

pub static DNA_4BIT_ALPHABET: Alphabet = Alphabet {
    tier: Tier::FourBit,
    bits_per_symbol: Tier::FourBit.bits_per_symbol(),
    encoding_array: &DNA_4BIT_ENCODING_ARRAY,
    decoding_array: &DNA_4BIT_DECODING_ARRAY,
};

/// Look up the alphabet for a given tier.
pub fn lookup_alphabet(tier: &Tier) -> &'static Alphabet {
    match tier {
        Tier::TwoBit => &DNA_2BIT_ALPHABET,
        Tier::ThreeBit => &DNA_3BIT_ALPHABET,
        Tier::FourBit => &DNA_4BIT_ALPHABET,
    }
}

/// Uppercases a sequence and strips line-break characters.
pub fn normalize(sequence: &str) -> String {
    sequence
        .chars()
        .filter(|c| !matches!(c, '\n' | '\r'))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

/// Determines the smallest tier able to represent a single symbol.
pub fn minimal_tier_for(symbol: char) -> Option<Tier> {
    let symbol = symbol.to_ascii_uppercase();
    Tier::ALL
        .into_iter()
        .find(|tier| tier.alphabet().code_of(symbol).is_some())
}

/// Tracks the smallest tier able to represent a sequence fed in chunks.
///
/// Symbol positions keep counting across chunks, so a failure in a later
/// chunk reports the position in the whole sequence. Line breaks are skipped
/// and do not count.
pub struct TierGuesser {
    tier: Tier,
    position: usize,
}

impl TierGuesser {
    /// Creates a new TierGuesser with the initial tier set to TwoBit.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        TierGuesser {
            tier: Tier::TwoBit,
            position: 0,
        }
    }

    pub fn update(&mut self, chunk: &str) -> Result<()> {
        for symbol in chunk.chars() {
            if matches!(symbol, '\n' | '\r') {
                continue;
            }

            let required = minimal_tier_for(symbol).ok_or(CodecError::UnsupportedSymbol {
                symbol,
                position: self.position,
                tier: Tier::FourBit,
            })?;

            if required > self.tier {
                self.tier = required;
            }
            self.position += 1;
        }
        Ok(())
    }

    pub fn guess(&self) -> Tier {
        self.tier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case('A', 0b00)]
    #[case('C', 0b01)]
    #[case('G', 0b10)]
    #[case('T', 0b11)]
    fn test_2bit_codes(#[case] symbol: char, #[case] code: u8) {
        assert_eq!(DNA_2BIT_ALPHABET.code_of(symbol), Some(code));
        assert_eq!(DNA_2BIT_ALPHABET.decode_code(code), Some(symbol));
    }

    #[rstest]
    #[case('A', 0b100)]
    #[case('C', 0b101)]
    #[case('G', 0b110)]
    #[case('T', 0b111)]
    #[case('N', 0b011)]
    #[case('-', 0b000)]
    fn test_3bit_codes(#[case] symbol: char, #[case] code: u8) {
        assert_eq!(DNA_3BIT_ALPHABET.code_of(symbol), Some(code));
        assert_eq!(DNA_3BIT_ALPHABET.decode_code(code), Some(symbol));
    }

    #[rstest]
    #[case('A', 0b1000)]
    #[case('C', 0b0100)]
    #[case('G', 0b0010)]
    #[case('T', 0b0001)]
    #[case('R', 0b1010)]
    #[case('Y', 0b0101)]
    #[case('S', 0b0110)]
    #[case('W', 0b1001)]
    #[case('K', 0b0011)]
    #[case('M', 0b1100)]
    #[case('B', 0b0111)]
    #[case('D', 0b1011)]
    #[case('H', 0b1101)]
    #[case('V', 0b1110)]
    #[case('N', 0b1111)]
    #[case('-', 0b0000)]
    fn test_4bit_presence_masks(#[case] symbol: char, #[case] code: u8) {
        assert_eq!(DNA_4BIT_ALPHABET.code_of(symbol), Some(code));
        assert_eq!(DNA_4BIT_ALPHABET.decode_code(code), Some(symbol));
    }

    #[test]
    fn test_stop_sentinel_and_spare_code_unassigned() {
        assert_eq!(DNA_3BIT_ALPHABET.decode_code(crate::consts::STOP_3BIT), None);
        assert_eq!(DNA_3BIT_ALPHABET.decode_code(0b001), None);
        for symbol in DNA_3BIT_ALPHABET.symbols() {
            assert_ne!(
                DNA_3BIT_ALPHABET.code_of(symbol),
                Some(crate::consts::STOP_3BIT)
            );
        }
    }

    #[rstest]
    #[case(Tier::ThreeBit)]
    #[case(Tier::FourBit)]
    fn test_dot_shares_gap_code(#[case] tier: Tier) {
        let alphabet = tier.alphabet();
        let gap = alphabet.code_of('-').unwrap();
        assert_eq!(alphabet.code_of('.'), Some(gap));
        assert_eq!(alphabet.decode_code(gap), Some('-'));
    }

    #[test]
    fn test_4bit_codes_are_bijective_over_canonical_symbols() {
        let mut seen = [false; 16];
        for symbol in DNA_4BIT_ALPHABET.symbols() {
            if symbol == '.' {
                continue;
            }
            let code = DNA_4BIT_ALPHABET.code_of(symbol).unwrap() as usize;
            assert!(!seen[code], "code {code:04b} assigned twice");
            seen[code] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_tiers_nest() {
        for symbol in DNA_2BIT_ALPHABET.symbols() {
            assert!(Tier::ThreeBit.supports(symbol));
        }
        for symbol in DNA_3BIT_ALPHABET.symbols() {
            assert!(Tier::FourBit.supports(symbol));
        }
        assert_eq!(DNA_2BIT_ALPHABET.symbols().len(), 4);
        assert_eq!(DNA_3BIT_ALPHABET.symbols().len(), 7);
        assert_eq!(DNA_4BIT_ALPHABET.symbols().len(), 17);
    }

    #[test]
    fn test_encode_symbol_rejects_larger_tier_symbols() {
        let err = DNA_2BIT_ALPHABET.encode_symbol('N', 7).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedSymbol {
                symbol: 'N',
                position: 7,
                tier: Tier::TwoBit
            }
        );
        assert!(DNA_3BIT_ALPHABET.encode_symbol('R', 0).is_err());
        assert!(DNA_4BIT_ALPHABET.encode_symbol('X', 0).is_err());
        assert!(DNA_4BIT_ALPHABET.encode_symbol('é', 0).is_err());
    }

    #[rstest]
    #[case('a', Some(Tier::TwoBit))]
    #[case('T', Some(Tier::TwoBit))]
    #[case('N', Some(Tier::ThreeBit))]
    #[case('.', Some(Tier::ThreeBit))]
    #[case('r', Some(Tier::FourBit))]
    #[case('X', None)]
    #[case(' ', None)]
    fn test_minimal_tier_for(#[case] symbol: char, #[case] expected: Option<Tier>) {
        assert_eq!(minimal_tier_for(symbol), expected);
    }

    #[test]
    fn test_tier_guesser_streaming() {
        let mut guesser = TierGuesser::new();

        guesser.update("ACGT").unwrap();
        assert_eq!(guesser.guess(), Tier::TwoBit);

        guesser.update("ac\ngt\r\n").unwrap();
        assert_eq!(guesser.guess(), Tier::TwoBit);

        guesser.update("N-").unwrap();
        assert_eq!(guesser.guess(), Tier::ThreeBit);

        guesser.update("RYM").unwrap();
        assert_eq!(guesser.guess(), Tier::FourBit);

        // Never steps back down
        guesser.update("A").unwrap();
        assert_eq!(guesser.guess(), Tier::FourBit);
    }

    #[test]
    fn test_tier_guesser_reports_position_across_chunks() {
        let mut guesser = TierGuesser::new();
        guesser.update("ACG\n").unwrap();
        let err = guesser.update("TX").unwrap_err();
        assert_eq!(
            err,
            CodecError::UnsupportedSymbol {
                symbol: 'X',
                position: 4,
                tier: Tier::FourBit
            }
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("acgt\nAC.g\r\n"), "ACGTAC.G");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_tier_tags() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_tag(tier.tag()), Some(tier));
        }
        assert_eq!(Tier::from_tag(0b00), None);
    }

    #[rstest]
    #[case("2bit", Tier::TwoBit)]
    #[case("3", Tier::ThreeBit)]
    #[case("FOUR_BIT", Tier::FourBit)]
    fn test_tier_from_str(#[case] input: &str, #[case] expected: Tier) {
        assert_eq!(input.parse::<Tier>().unwrap(), expected);
    }

    #[test]
    fn test_tier_display_round_trips() {
        for tier in Tier::ALL {
            assert_eq!(tier.to_string().parse::<Tier>().unwrap(), tier);
        }
        assert!("5bit".parse::<Tier>().is_err());
    }

    #[test]
    fn test_alphabet_width_matches_tier() {
        for tier in Tier::ALL {
            let alphabet = tier.alphabet();
            assert_eq!(alphabet.tier, tier);
            assert_eq!(alphabet.bits_per_symbol, tier.bits_per_symbol());
            assert!(alphabet.decoding_array.len() >= 1 << tier.bits_per_symbol());
        }
        assert_eq!(DNA_3BIT_ALPHABET.bits_per_symbol, 3);
    }

    #[test]
    fn test_tier_order_follows_containment() {
        assert!(Tier::TwoBit < Tier::ThreeBit);
        assert!(Tier::ThreeBit < Tier::FourBit);
    }
}
