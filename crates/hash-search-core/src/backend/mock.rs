//! Scripted backend for coordinator tests.

use super::{ComputeBackend, SearchParameters, SearchResult};
use crate::codec;
use crate::error::{Error, Result};

/// One dispatch as observed by the mock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRecord {
    pub params: SearchParameters,
    pub window_size: u64,
    /// `result.found` as handed in by the coordinator
    pub found_on_entry: bool,
}

/// Backend that "matches" a fixed list of `(length, repetitions, index)`
/// candidates instead of hashing.
#[derive(Debug, Default)]
pub struct MockBackend {
    winners: Vec<(u8, Option<u8>, u64)>,
    fail_on_dispatch: Option<usize>,
    pub dispatches: Vec<DispatchRecord>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat candidate `index` of the given target as a match
    pub fn with_winner(mut self, length: u8, repetitions: Option<u8>, index: u64) -> Self {
        self.winners.push((length, repetitions, index));
        self
    }

    /// Fail the `n`-th dispatch (zero-based)
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_on_dispatch = Some(n);
        self
    }
}

impl ComputeBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn dispatch(
        &mut self,
        params: &SearchParameters,
        window_size: u64,
        result: &mut SearchResult,
    ) -> Result<()> {
        let n = self.dispatches.len();
        self.dispatches.push(DispatchRecord {
            params: *params,
            window_size,
            found_on_entry: result.found,
        });

        if self.fail_on_dispatch == Some(n) {
            return Err(Error::DispatchFailed {
                offset: params.window_offset,
                message: "device lost".to_string(),
            });
        }

        let start = params.window_offset;
        let end = start + window_size;
        let winner = self.winners.iter().find(|(length, repetitions, index)| {
            *length == params.length
                && *repetitions == params.repetitions
                && (start..end).contains(index)
        });

        if let Some(&(length, _, index)) = winner {
            result.record(&codec::encode(index, length)?);
        }
        Ok(())
    }
}
