//! # hash-search-core
//!
//! Core library for the button-sequence hash search.
//!
//! This crate provides:
//! - The sequence codec between base-8 candidate indices and button strings
//! - The two-word button hash
//! - Window planning over `8^length` candidate spaces
//! - The compute backend boundary and a multi-threaded CPU backend
//! - The search coordinator for fixed-length and length x repetition searches

pub mod backend;
pub mod codec;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod hash;
pub mod planner;

pub use backend::{ComputeBackend, CpuBackend, SearchParameters, SearchResult};
pub use codec::{SEQUENCE_CAPACITY, Symbol, SymbolBuffer, decode, encode, parse_sequence};
pub use config::{SearchConfig, SearchConfigBuilder};
pub use coordinator::{
    EnumerationTarget, NoProgress, ProgressObserver, SearchCoordinator, SearchMatch,
    SearchOutcome, SearchState, fixed_targets, range_targets,
};
pub use error::{Error, Result};
pub use hash::{HashState, TargetHash, hash_repeated, hash_symbols};
pub use planner::{MAX_WINDOW_SIZE, Window, Windows, next_window, space_size, windows};
