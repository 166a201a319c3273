//! Hash command: print the two hash words of a sequence.

use anyhow::Result;
use hash_search_core::{hash_symbols, parse_sequence};

/// Run the hash command
pub fn run(sequence: &str) -> Result<()> {
    let symbols = parse_sequence(sequence)?;
    let hash = hash_symbols(symbols.as_slice());

    println!("Sequence: {} ({} symbols)", symbols, symbols.len());
    println!("Hashes: {}", hash);
    Ok(())
}
