//! Windowed search coordinator.
//!
//! Drives the window planner and a [`ComputeBackend`] over a list of
//! enumeration targets, one synchronous dispatch at a time, stopping at the
//! first window that reports a match.
//!
//! # State machine
//!
//! ```text
//!            ┌──────────────────────────────────────────┐
//!            ▼                                          │ next window /
//!   Idle ─► Dispatching ─► Checking ─► Advancing ───────┘ next target
//!   │                        │            │
//!   │                        ▼            ▼
//!   │                      Found      Exhausted
//!   └──── (no targets) ───────────────────▲
//! ```
//!
//! Windows are visited in increasing offset order and targets in increasing
//! `(length, repetitions)` order, so the reported match lies in the earliest
//! window that contains any match. Which match is reported when one window
//! holds several is up to the backend.

use std::fmt;
use std::ops::RangeInclusive;

use strum::Display;
use tracing::{debug, info, trace};

use crate::backend::{ComputeBackend, SearchParameters, SearchResult};
use crate::codec::{self, SEQUENCE_CAPACITY};
use crate::error::{Error, Result};
use crate::hash::TargetHash;
use crate::planner;

/// The `(length)` or `(length, repetitions)` combination being searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumerationTarget {
    /// Candidates of exactly `length` symbols
    Fixed { length: u8 },
    /// A `length`-symbol block rendered `repetitions` times
    Repeated { length: u8, repetitions: u8 },
}

impl EnumerationTarget {
    pub fn length(&self) -> u8 {
        match *self {
            Self::Fixed { length } | Self::Repeated { length, .. } => length,
        }
    }

    pub fn repetitions(&self) -> Option<u8> {
        match *self {
            Self::Fixed { .. } => None,
            Self::Repeated { repetitions, .. } => Some(repetitions),
        }
    }

    /// Symbols in a rendered candidate
    pub fn rendered_length(&self) -> usize {
        self.length() as usize * self.repetitions().unwrap_or(1) as usize
    }

    /// Candidates in this target: `8^length`
    pub fn space_size(&self) -> Result<u64> {
        planner::space_size(self.length())
    }

    /// Reject targets the search cannot represent
    pub fn validate(&self) -> Result<()> {
        if self.length() == 0 {
            return Err(Error::InvalidLength(
                "length must be at least 1".to_string(),
            ));
        }
        self.space_size()?;
        if self.repetitions() == Some(0) {
            return Err(Error::InvalidRepetitions(
                "repetitions must be at least 1".to_string(),
            ));
        }
        if self.rendered_length() > SEQUENCE_CAPACITY {
            return Err(Error::SequenceTooLong {
                length: self.rendered_length(),
                capacity: SEQUENCE_CAPACITY,
            });
        }
        Ok(())
    }
}

impl fmt::Display for EnumerationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Fixed { length } => write!(f, "length {}", length),
            Self::Repeated {
                length,
                repetitions,
            } => write!(f, "length {} x {} repetitions", length, repetitions),
        }
    }
}

/// Single target searching exactly `length` symbols
pub fn fixed_targets(length: u8) -> Result<Vec<EnumerationTarget>> {
    let target = EnumerationTarget::Fixed { length };
    target.validate()?;
    Ok(vec![target])
}

/// Cross product of a length range and a repetition range.
///
/// Length-major, repetition-minor, ascending in both.
pub fn range_targets(
    lengths: RangeInclusive<u8>,
    repetitions: RangeInclusive<u8>,
) -> Result<Vec<EnumerationTarget>> {
    if lengths.is_empty() {
        return Err(Error::EmptyRange {
            what: "length",
            min: *lengths.start(),
            max: *lengths.end(),
        });
    }
    if repetitions.is_empty() {
        return Err(Error::EmptyRange {
            what: "repetition",
            min: *repetitions.start(),
            max: *repetitions.end(),
        });
    }

    let mut targets = Vec::new();
    for length in lengths {
        for reps in repetitions.clone() {
            let target = EnumerationTarget::Repeated {
                length,
                repetitions: reps,
            };
            target.validate()?;
            targets.push(target);
        }
    }
    Ok(targets)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum SearchState {
    Idle,
    Dispatching,
    Checking,
    Advancing,
    Found,
    Exhausted,
}

impl SearchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Found | Self::Exhausted)
    }
}

/// A decoded match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMatch {
    /// Rendered candidate (block repeated as the target requires)
    pub sequence: String,
    /// Base-8 index of the block within its target's space
    pub index: u64,
    pub target: EnumerationTarget,
    pub hash: TargetHash,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SearchMatch),
    Exhausted,
}

/// Progress callbacks, invoked from the coordinator's thread.
///
/// Purely informational; nothing the observer does affects the search.
pub trait ProgressObserver {
    fn target_started(&mut self, _target: &EnumerationTarget, _space: u64) {}

    /// `searched` candidates of `space` are done for `target`
    fn window_completed(&mut self, _target: &EnumerationTarget, _searched: u64, _space: u64) {}
}

/// Observer that ignores every event
pub struct NoProgress;

impl ProgressObserver for NoProgress {}

pub struct SearchCoordinator<B: ComputeBackend> {
    backend: B,
    target_hash: TargetHash,
    window_cap: u64,
    targets: Vec<EnumerationTarget>,
    state: SearchState,
    target_index: usize,
    space: u64,
    window_offset: u64,
    window_size: u64,
    params: SearchParameters,
    result: SearchResult,
    found: Option<SearchMatch>,
}

impl<B: ComputeBackend> SearchCoordinator<B> {
    pub fn new(
        backend: B,
        target_hash: TargetHash,
        targets: Vec<EnumerationTarget>,
        window_cap: u64,
    ) -> Result<Self> {
        if window_cap == 0 {
            return Err(Error::InvalidWindowSize);
        }
        for target in &targets {
            target.validate()?;
        }

        Ok(Self {
            backend,
            target_hash,
            window_cap,
            targets,
            state: SearchState::Idle,
            target_index: 0,
            space: 0,
            window_offset: 0,
            window_size: 0,
            params: SearchParameters::default(),
            result: SearchResult::new(),
            found: None,
        })
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn target_hash(&self) -> TargetHash {
        self.target_hash
    }

    pub fn targets(&self) -> &[EnumerationTarget] {
        &self.targets
    }

    /// Target being searched (`None` before the first step and once exhausted)
    pub fn current_target(&self) -> Option<&EnumerationTarget> {
        match self.state {
            SearchState::Idle | SearchState::Exhausted => None,
            _ => self.targets.get(self.target_index),
        }
    }

    pub fn window_offset(&self) -> u64 {
        self.window_offset
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Final result once the search reached a terminal state
    pub fn outcome(&self) -> Option<SearchOutcome> {
        match self.state {
            SearchState::Found => self.found.clone().map(SearchOutcome::Found),
            SearchState::Exhausted => Some(SearchOutcome::Exhausted),
            _ => None,
        }
    }

    /// Run until `Found` or `Exhausted`; a backend error aborts the search
    pub fn run(&mut self, progress: &mut dyn ProgressObserver) -> Result<SearchOutcome> {
        loop {
            self.step(progress)?;
            if let Some(outcome) = self.outcome() {
                return Ok(outcome);
            }
        }
    }

    /// Perform one state transition and return the new state
    pub fn step(&mut self, progress: &mut dyn ProgressObserver) -> Result<SearchState> {
        let previous = self.state;
        self.state = match self.state {
            SearchState::Idle => {
                if self.targets.is_empty() {
                    info!("No enumeration targets to search");
                    SearchState::Exhausted
                } else {
                    self.begin_target(0, progress)?;
                    SearchState::Dispatching
                }
            }
            SearchState::Dispatching => {
                self.dispatch()?;
                SearchState::Checking
            }
            SearchState::Checking => {
                if self.result.found {
                    let found = self.decode_match()?;
                    info!(
                        "Match in window at {:#x}: {} ({})",
                        self.window_offset, found.sequence, found.target
                    );
                    self.found = Some(found);
                    SearchState::Found
                } else {
                    SearchState::Advancing
                }
            }
            SearchState::Advancing => self.advance(progress)?,
            terminal @ (SearchState::Found | SearchState::Exhausted) => terminal,
        };
        trace!("{} -> {}", previous, self.state);
        Ok(self.state)
    }

    fn begin_target(&mut self, index: usize, progress: &mut dyn ProgressObserver) -> Result<()> {
        let target = self.targets[index];
        self.target_index = index;
        self.space = target.space_size()?;
        self.window_offset = 0;
        self.window_size = 0;

        info!(
            "Searching {} ({} candidates, {} windows)",
            target,
            self.space,
            self.space.div_ceil(self.window_cap)
        );
        progress.target_started(&target, self.space);
        Ok(())
    }

    fn dispatch(&mut self) -> Result<()> {
        let target = self.targets[self.target_index];
        let size = planner::next_window(
            self.window_offset,
            self.space - self.window_offset,
            self.window_cap,
        );

        self.result.reset();
        self.params = SearchParameters {
            window_offset: self.window_offset,
            target_hash_lo: self.target_hash.lo,
            target_hash_hi: self.target_hash.hi,
            length: target.length(),
            repetitions: target.repetitions(),
        };

        debug!(
            "Dispatching window [{:#x}, {:#x}) to {} backend",
            self.window_offset,
            self.window_offset + size,
            self.backend.name()
        );
        self.backend.dispatch(&self.params, size, &mut self.result)?;
        self.window_size = size;
        Ok(())
    }

    fn decode_match(&self) -> Result<SearchMatch> {
        let target = self.targets[self.target_index];
        let block = self.result.block()?;
        let sequence = match target {
            EnumerationTarget::Fixed { .. } => block.render(),
            EnumerationTarget::Repeated { repetitions, .. } => block.render_repeated(repetitions),
        };

        Ok(SearchMatch {
            sequence,
            index: codec::decode(block.as_slice())?,
            target,
            hash: self.target_hash,
        })
    }

    fn advance(&mut self, progress: &mut dyn ProgressObserver) -> Result<SearchState> {
        let target = self.targets[self.target_index];
        self.window_offset += self.window_size;
        progress.window_completed(&target, self.window_offset, self.space);

        if self.window_offset < self.space {
            return Ok(SearchState::Dispatching);
        }

        debug!("Finished {} without a match", target);
        let next = self.target_index + 1;
        if next < self.targets.len() {
            self.begin_target(next, progress)?;
            Ok(SearchState::Dispatching)
        } else {
            info!("Exhausted every target without a match");
            Ok(SearchState::Exhausted)
        }
    }
}
