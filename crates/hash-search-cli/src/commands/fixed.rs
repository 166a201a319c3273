//! Fixed-length search command.

use anyhow::Result;
use hash_search_core::{SearchConfig, TargetHash, fixed_targets};

use super::hex_utils::parse_hex_word;

/// Search every sequence of exactly `length` symbols.
///
/// Shorter sequences are not visited.
pub fn run(length: u8, hash_1: &str, hash_2: &str, config: &SearchConfig) -> Result<bool> {
    let target_hash = TargetHash::new(parse_hex_word(hash_1)?, parse_hex_word(hash_2)?);
    let targets = fixed_targets(length)?;
    super::search::run(targets, target_hash, config)
}
