//! Sequence codec: base-8 candidate indices <-> button symbol strings.
//!
//! Candidate `i` of a `length`-symbol space is the base-8 representation of
//! `i`, most-significant digit first, with each digit mapped through the
//! alphabet table:
//!
//! ```text
//! digit   0  1  2  3  4  5  6  7
//! symbol  S  X  C  T  L  D  R  U
//! ```

use std::fmt;
use std::str::FromStr;

use strum::{Display, EnumString, FromRepr, IntoStaticStr};

use crate::error::{Error, Result};

/// Fixed capacity of a candidate symbol buffer
pub const SEQUENCE_CAPACITY: usize = 32;

/// Number of symbols in the alphabet
pub const ALPHABET_SIZE: u64 = 8;

/// Bits encoded by one symbol (log2 of the alphabet size)
pub const BITS_PER_SYMBOL: u32 = 3;

/// One controller button
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    FromRepr,
    EnumString,
    IntoStaticStr,
    Display,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum Symbol {
    #[default]
    #[strum(serialize = "S")]
    Square = 0,
    #[strum(serialize = "X")]
    Cross = 1,
    #[strum(serialize = "C")]
    Circle = 2,
    #[strum(serialize = "T")]
    Triangle = 3,
    #[strum(serialize = "L")]
    Left = 4,
    #[strum(serialize = "D")]
    Down = 5,
    #[strum(serialize = "R")]
    Right = 6,
    #[strum(serialize = "U")]
    Up = 7,
}

impl Symbol {
    /// Map a base-8 digit to its symbol; only the low three bits are used
    pub fn from_digit(digit: u8) -> Self {
        // from_repr always succeeds for values 0..8
        Self::from_repr(digit & 0x7).unwrap_or_default()
    }

    pub fn from_char(c: char) -> Result<Self> {
        let mut buf = [0u8; 4];
        Self::from_str(c.encode_utf8(&mut buf)).map_err(|_| Error::InvalidSymbol(c))
    }

    pub fn digit(self) -> u8 {
        self as u8
    }

    pub fn letter(self) -> &'static str {
        self.into()
    }
}

/// Fixed-capacity symbol array with an explicit length.
///
/// Mirrors the 32-slot sequence slot of the backend result record.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SymbolBuffer {
    symbols: [Symbol; SEQUENCE_CAPACITY],
    len: u8,
}

impl SymbolBuffer {
    pub fn new() -> Self {
        Self {
            symbols: [Symbol::Square; SEQUENCE_CAPACITY],
            len: 0,
        }
    }

    /// Build a buffer from a backend's raw symbol-index array.
    ///
    /// Raw values are reduced modulo 8.
    pub fn from_indices(length: u8, raw: &[u8; SEQUENCE_CAPACITY]) -> Result<Self> {
        check_capacity(length as usize)?;
        let mut buffer = Self::new();
        for &digit in &raw[..length as usize] {
            buffer.push(Symbol::from_digit(digit))?;
        }
        Ok(buffer)
    }

    pub fn push(&mut self, symbol: Symbol) -> Result<()> {
        check_capacity(self.len as usize + 1)?;
        self.symbols[self.len as usize] = symbol;
        self.len += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols[..self.len as usize]
    }

    /// Raw symbol indices in backend result layout (unused slots are zero)
    pub fn to_indices(&self) -> [u8; SEQUENCE_CAPACITY] {
        let mut raw = [0u8; SEQUENCE_CAPACITY];
        for (slot, symbol) in raw.iter_mut().zip(self.as_slice()) {
            *slot = symbol.digit();
        }
        raw
    }

    pub fn render(&self) -> String {
        self.as_slice().iter().map(|s| s.letter()).collect()
    }

    /// Render the block `repetitions` times back to back
    pub fn render_repeated(&self, repetitions: u8) -> String {
        self.render().repeat(repetitions as usize)
    }
}

impl Default for SymbolBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SymbolBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolBuffer({:?})", self.render())
    }
}

impl fmt::Display for SymbolBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn check_capacity(length: usize) -> Result<()> {
    if length > SEQUENCE_CAPACITY {
        return Err(Error::SequenceTooLong {
            length,
            capacity: SEQUENCE_CAPACITY,
        });
    }
    Ok(())
}

/// Render the low `length` base-8 digits of `index`, most-significant first.
///
/// Digits above `length` are dropped, so callers keep `index < 8^length`.
pub fn encode(index: u64, length: u8) -> Result<SymbolBuffer> {
    check_capacity(length as usize)?;

    let mut buffer = SymbolBuffer::new();
    buffer.len = length;
    let mut rest = index;
    for slot in buffer.symbols[..length as usize].iter_mut().rev() {
        *slot = Symbol::from_digit((rest & 0x7) as u8);
        rest >>= BITS_PER_SYMBOL;
    }
    Ok(buffer)
}

/// Inverse of [`encode`]
pub fn decode(symbols: &[Symbol]) -> Result<u64> {
    if symbols.len() as u32 * BITS_PER_SYMBOL >= u64::BITS {
        return Err(Error::SpaceOverflow {
            length: symbols.len().min(u8::MAX as usize) as u8,
        });
    }
    Ok(symbols
        .iter()
        .fold(0u64, |acc, s| (acc << BITS_PER_SYMBOL) | s.digit() as u64))
}

/// Parse a symbol string such as `"SXCT"` (case-insensitive)
pub fn parse_sequence(s: &str) -> Result<SymbolBuffer> {
    let mut buffer = SymbolBuffer::new();
    for c in s.chars() {
        buffer.push(Symbol::from_char(c)?)?;
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_two_symbol_scenario() {
        assert_eq!(encode(0, 2).unwrap().render(), "SS");
        assert_eq!(encode(9, 2).unwrap().render(), "XX");
        assert_eq!(encode(63, 2).unwrap().render(), "UU");
    }

    #[test]
    fn test_encode_most_significant_first() {
        // 0o1234567 -> X C T L D R U
        assert_eq!(encode(0o1234567, 7).unwrap().render(), "XCTLDRU");
        assert_eq!(encode(1, 3).unwrap().render(), "SSX");
        assert_eq!(encode(8, 3).unwrap().render(), "SXS");
    }

    #[test]
    fn test_encode_zero_length() {
        let buffer = encode(0, 0).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.render(), "");
    }

    #[test]
    fn test_encode_full_capacity() {
        let buffer = encode(u64::MAX, 32).unwrap();
        assert_eq!(buffer.len(), 32);
        // 64 bits fill 22 digits (the top one holds a single bit)
        assert!(buffer.render().starts_with("SSSSSSSSSSX"));
        assert!(buffer.render().ends_with("UUUU"));
    }

    #[test]
    fn test_encode_rejects_over_capacity() {
        assert!(matches!(
            encode(0, 33),
            Err(Error::SequenceTooLong {
                length: 33,
                capacity: 32
            })
        ));
    }

    #[test]
    fn test_decode_inverts_encode() {
        for length in 1..=4u8 {
            let space = ALPHABET_SIZE.pow(length as u32);
            for index in 0..space {
                let buffer = encode(index, length).unwrap();
                assert_eq!(decode(buffer.as_slice()).unwrap(), index);
            }
        }

        let buffer = encode(0x7FFF_FFFF_FFFF_FFFF, 21).unwrap();
        assert_eq!(decode(buffer.as_slice()).unwrap(), 0x7FFF_FFFF_FFFF_FFFF);
    }

    #[test]
    fn test_decode_rejects_overflow() {
        let symbols = [Symbol::Up; 22];
        assert!(matches!(
            decode(&symbols),
            Err(Error::SpaceOverflow { length: 22 })
        ));
    }

    #[test]
    fn test_render_repeated() {
        let block = encode(9, 2).unwrap();
        assert_eq!(block.render_repeated(1), "XX");
        assert_eq!(block.render_repeated(3), "XXXXXX");

        let single = encode(7, 1).unwrap();
        assert_eq!(single.render_repeated(2), "UU");
    }

    #[test]
    fn test_parse_sequence() {
        let buffer = parse_sequence("sxCTldRU").unwrap();
        assert_eq!(buffer.render(), "SXCTLDRU");
        assert_eq!(decode(buffer.as_slice()).unwrap(), 0o01234567);
    }

    #[test]
    fn test_parse_sequence_invalid_symbol() {
        assert!(matches!(
            parse_sequence("SXZ"),
            Err(Error::InvalidSymbol('Z'))
        ));
    }

    #[test]
    fn test_parse_sequence_too_long() {
        let long = "S".repeat(33);
        assert!(matches!(
            parse_sequence(&long),
            Err(Error::SequenceTooLong { .. })
        ));
    }

    #[test]
    fn test_indices_roundtrip_through_result_layout() {
        let buffer = parse_sequence("UDX").unwrap();
        let raw = buffer.to_indices();
        assert_eq!(&raw[..4], &[7, 5, 1, 0]);
        assert_eq!(SymbolBuffer::from_indices(3, &raw).unwrap(), buffer);
    }

    #[test]
    fn test_from_indices_masks_raw_values() {
        let mut raw = [0u8; SEQUENCE_CAPACITY];
        raw[0] = 9;
        raw[1] = 0xFF;
        let buffer = SymbolBuffer::from_indices(2, &raw).unwrap();
        assert_eq!(buffer.render(), "XU");
    }

    #[test]
    fn test_symbol_letters() {
        assert_eq!(Symbol::Square.letter(), "S");
        assert_eq!(Symbol::Up.to_string(), "U");
        assert_eq!(Symbol::from_char('r').unwrap(), Symbol::Right);
        assert_eq!(Symbol::from_digit(5), Symbol::Down);
    }
}
