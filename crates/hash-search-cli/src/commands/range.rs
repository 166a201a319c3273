//! Length x repetition range search command.

use anyhow::Result;
use hash_search_core::{SearchConfig, TargetHash, range_targets};

use super::hex_utils::parse_hex_word;

/// Search every `(length, repetitions)` pair, length-major, smallest first
pub fn run(
    min_length: u8,
    max_length: u8,
    min_repetitions: u8,
    max_repetitions: u8,
    hash_1: &str,
    hash_2: &str,
    config: &SearchConfig,
) -> Result<bool> {
    let target_hash = TargetHash::new(parse_hex_word(hash_1)?, parse_hex_word(hash_2)?);
    let targets = range_targets(min_length..=max_length, min_repetitions..=max_repetitions)?;
    super::search::run(targets, target_hash, config)
}
