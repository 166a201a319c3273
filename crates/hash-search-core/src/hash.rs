//! Two-word rolling hash over button symbols.
//!
//! Each symbol carries a pair of 32-bit constants `(x, y)`. Starting from
//! `(0, 0)`, every symbol updates the state as:
//!
//! ```text
//! t1  = h1 ^ x
//! h1' = rotl(t1, 1) * 0x209
//! t2  = h2 ^ y ^ (h1' >> 8)
//! h2' = (t2 << 1) ^ ((h2 ^ y) >> 31)
//! ```
//!
//! The first word only depends on the first-word chain, so a search can
//! reject most candidates before computing the second word.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::codec::Symbol;

const X: [u32; 8] = [
    0x0318_5332,
    0xB876_10DB,
    0xDEAD_BEEF,
    0x3141_5926,
    0x93FE_1682,
    0x7766_43D1,
    0xAB43_2901,
    0x0123_4567,
];

const Y: [u32; 8] = [
    0x80FE_4187,
    0xDE09_8401,
    0xFE30_10F3,
    0x7720_DE42,
    0x9255_1072,
    0x0901_D3E8,
    0x88D3_A109,
    0x3485_9F3A,
];

const MULTIPLIER: u32 = 0x209;

/// Target hash pair (`lo` is the first hash word, `hi` the second)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TargetHash {
    pub lo: u32,
    pub hi: u32,
}

impl TargetHash {
    pub fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }
}

impl fmt::Display for TargetHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X} 0x{:08X}", self.lo, self.hi)
    }
}

#[inline]
fn step_lo(h1: u32, symbol: Symbol) -> u32 {
    let t1 = h1 ^ X[symbol as usize];
    t1.rotate_left(1).wrapping_mul(MULTIPLIER)
}

#[inline]
fn step_hi(h2: u32, h1: u32, symbol: Symbol) -> u32 {
    let y = Y[symbol as usize];
    let t2 = h2 ^ y ^ (h1 >> 8);
    (t2 << 1) ^ ((h2 ^ y) >> 31)
}

/// Running hash state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HashState {
    lo: u32,
    hi: u32,
}

impl HashState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, symbol: Symbol) {
        self.lo = step_lo(self.lo, symbol);
        self.hi = step_hi(self.hi, self.lo, symbol);
    }

    pub fn feed_all(&mut self, symbols: &[Symbol]) {
        for &symbol in symbols {
            self.feed(symbol);
        }
    }

    pub fn finish(self) -> TargetHash {
        TargetHash::new(self.lo, self.hi)
    }
}

/// Hash a complete symbol sequence
pub fn hash_symbols(symbols: &[Symbol]) -> TargetHash {
    let mut state = HashState::new();
    state.feed_all(symbols);
    state.finish()
}

/// Hash `block` fed `repetitions` times in a row
pub fn hash_repeated(block: &[Symbol], repetitions: u8) -> TargetHash {
    let mut state = HashState::new();
    for _ in 0..repetitions {
        state.feed_all(block);
    }
    state.finish()
}

/// Check `block` repeated `repetitions` times against `target`.
///
/// The second word is only computed once the first word matches.
pub fn matches_repeated(block: &[Symbol], repetitions: u8, target: TargetHash) -> bool {
    let mut lo = 0u32;
    for _ in 0..repetitions {
        for &symbol in block {
            lo = step_lo(lo, symbol);
        }
    }
    if lo != target.lo {
        return false;
    }
    hash_repeated(block, repetitions).hi == target.hi
}
