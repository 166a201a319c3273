use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, trace};

use super::{ComputeBackend, SearchParameters, SearchResult};
use crate::codec::{self, SEQUENCE_CAPACITY};
use crate::error::{Error, Result};
use crate::hash::{self, TargetHash};
use crate::planner::MAX_SPACE_LENGTH;

/// Multi-threaded CPU backend.
///
/// Each window is split across a dedicated rayon pool; the first match any
/// worker sees wins, so which of several matches in one window is reported
/// is unspecified.
pub struct CpuBackend {
    pool: ThreadPool,
}

impl CpuBackend {
    /// Create a backend with `threads` workers (`0` = one per core)
    pub fn new(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("hash-search-{}", i))
            .build()
            .map_err(|e| Error::BackendUnavailable(e.to_string()))?;

        debug!("CPU backend ready with {} workers", pool.current_num_threads());
        Ok(Self { pool })
    }

    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

fn candidate_matches(index: u64, length: u8, feed_count: u8, target: TargetHash) -> bool {
    match codec::encode(index, length) {
        Ok(block) => hash::matches_repeated(block.as_slice(), feed_count, target),
        Err(_) => false,
    }
}

impl ComputeBackend for CpuBackend {
    fn name(&self) -> &str {
        "cpu"
    }

    fn dispatch(
        &mut self,
        params: &SearchParameters,
        window_size: u64,
        result: &mut SearchResult,
    ) -> Result<()> {
        let offset = params.window_offset;
        let length = params.length;
        let feed_count = params.feed_count();
        let target = params.target_hash();

        if length > MAX_SPACE_LENGTH
            || length as usize * feed_count as usize > SEQUENCE_CAPACITY
        {
            return Err(Error::DispatchFailed {
                offset,
                message: format!(
                    "unsupported block shape: {} symbols x {}",
                    length, feed_count
                ),
            });
        }

        let end = offset
            .checked_add(window_size)
            .ok_or_else(|| Error::DispatchFailed {
                offset,
                message: format!("window size {} overflows the index range", window_size),
            })?;

        trace!("cpu dispatch: [{:#x}, {:#x})", offset, end);

        let hit = self.pool.install(|| {
            (offset..end)
                .into_par_iter()
                .find_any(|&index| candidate_matches(index, length, feed_count, target))
        });

        if let Some(index) = hit {
            let block = codec::encode(index, length)?;
            debug!("cpu backend matched candidate {:#x} ({})", index, block);
            result.record(&block);
        }

        Ok(())
    }
}
