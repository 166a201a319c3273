//! Window planning for the candidate space.
//!
//! A target's space `[0, 8^length)` is cut into contiguous, non-overlapping
//! windows of at most `cap` candidates, visited in increasing offset order.

use crate::codec::BITS_PER_SYMBOL;
use crate::error::{Error, Result};

/// Largest window handed to a backend in one dispatch (2^32 - 1)
pub const MAX_WINDOW_SIZE: u64 = 65536 * 65536 - 1;

/// Longest block whose space still fits a u64 (3 * 21 = 63 bits)
pub const MAX_SPACE_LENGTH: u8 = 21;

/// Number of candidates of `length` symbols: `8^length`
pub fn space_size(length: u8) -> Result<u64> {
    if length as u32 * BITS_PER_SYMBOL >= u64::BITS {
        return Err(Error::SpaceOverflow { length });
    }
    Ok(1u64 << (BITS_PER_SYMBOL * length as u32))
}

/// Size of the window starting at the current offset
pub fn next_window(_offset: u64, remaining: u64, cap: u64) -> u64 {
    cap.min(remaining)
}

/// Half-open range `[offset, offset + size)` of candidate indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: u64,
    pub size: u64,
}

impl Window {
    pub fn end(&self) -> u64 {
        self.offset + self.size
    }

    pub fn contains(&self, index: u64) -> bool {
        index >= self.offset && index < self.end()
    }
}

/// Lazy iterator over the windows of one space
#[derive(Debug, Clone)]
pub struct Windows {
    offset: u64,
    space: u64,
    cap: u64,
}

impl Windows {
    pub fn new(space: u64, cap: u64) -> Result<Self> {
        if cap == 0 {
            return Err(Error::InvalidWindowSize);
        }
        Ok(Self {
            offset: 0,
            space,
            cap,
        })
    }
}

impl Iterator for Windows {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.offset >= self.space {
            return None;
        }
        let size = next_window(self.offset, self.space - self.offset, self.cap);
        let window = Window {
            offset: self.offset,
            size,
        };
        self.offset += size;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.space - self.offset.min(self.space)).div_ceil(self.cap);
        let n = usize::try_from(remaining).unwrap_or(usize::MAX);
        (n, usize::try_from(remaining).ok())
    }
}

/// Windows covering a `length`-symbol space
pub fn windows(length: u8, cap: u64) -> Result<Windows> {
    Windows::new(space_size(length)?, cap)
}
