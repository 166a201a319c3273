//! Compute backend boundary.
//!
//! The coordinator hands a backend one window at a time: an immutable
//! [`SearchParameters`] record, the window size, and exclusive access to a
//! [`SearchResult`] record. The backend evaluates every candidate of the
//! window and, on a match, writes that candidate's block into the result.
//!
//! ```text
//!   Coordinator ──params (&)──────►┌──────────────┐
//!               ──window size─────►│ ComputeBackend│──► N candidates in parallel
//!               ◄─result (&mut)────└──────────────┘
//! ```

mod cpu;
#[cfg(test)]
pub mod mock;

pub use cpu::CpuBackend;
#[cfg(test)]
pub use mock::MockBackend;

use crate::codec::{SEQUENCE_CAPACITY, SymbolBuffer};
use crate::error::Result;
use crate::hash::TargetHash;

/// Per-dispatch parameter record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchParameters {
    /// Index of the first candidate in the window
    pub window_offset: u64,
    pub target_hash_lo: u32,
    pub target_hash_hi: u32,
    /// Symbols per block (the full candidate in fixed-length mode)
    pub length: u8,
    /// Block repetitions; `None` in fixed-length mode
    pub repetitions: Option<u8>,
}

impl SearchParameters {
    pub fn target_hash(&self) -> TargetHash {
        TargetHash::new(self.target_hash_lo, self.target_hash_hi)
    }

    /// Times the block is fed to the hash (1 in fixed-length mode)
    pub fn feed_count(&self) -> u8 {
        self.repetitions.unwrap_or(1)
    }
}

/// Per-dispatch result record
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub found: bool,
    /// Symbols written to `sequence` (the block length)
    pub length: u8,
    /// Raw symbol indices of the winning block
    pub sequence: [u8; SEQUENCE_CAPACITY],
}

impl SearchResult {
    pub fn new() -> Self {
        Self {
            found: false,
            length: 0,
            sequence: [0; SEQUENCE_CAPACITY],
        }
    }

    /// Clear the match flag before a dispatch
    pub fn reset(&mut self) {
        self.found = false;
    }

    /// Store a winning block
    pub fn record(&mut self, block: &SymbolBuffer) {
        self.found = true;
        self.length = block.len() as u8;
        self.sequence = block.to_indices();
    }

    /// The stored block as symbols
    pub fn block(&self) -> Result<SymbolBuffer> {
        SymbolBuffer::from_indices(self.length, &self.sequence)
    }
}

impl Default for SearchResult {
    fn default() -> Self {
        Self::new()
    }
}

/// A parallel evaluator for one window of candidates.
///
/// # Contract
///
/// - Every index in `[params.window_offset, params.window_offset + window_size)`
///   is evaluated: its `params.length`-symbol block, fed
///   `params.feed_count()` times, is hashed and compared with
///   `params.target_hash()`.
/// - If at least one candidate matches, `result.found` is `true` when
///   `dispatch` returns and `result` holds one (arbitrary) winner.
/// - If none matches, `result` is left exactly as it was passed in.
/// - `dispatch` blocks until the whole window has been evaluated.
pub trait ComputeBackend {
    /// Short backend identifier for logs
    fn name(&self) -> &str;

    /// Evaluate one window
    fn dispatch(
        &mut self,
        params: &SearchParameters,
        window_size: u64,
        result: &mut SearchResult,
    ) -> Result<()>;
}

impl<B: ComputeBackend + ?Sized> ComputeBackend for Box<B> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn dispatch(
        &mut self,
        params: &SearchParameters,
        window_size: u64,
        result: &mut SearchResult,
    ) -> Result<()> {
        (**self).dispatch(params, window_size, result)
    }
}
