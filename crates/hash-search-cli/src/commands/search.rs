//! Shared search driver for the `fixed` and `range` commands.

use anyhow::Result;
use hash_search_core::{
    CpuBackend, EnumerationTarget, SearchConfig, SearchCoordinator, SearchMatch, SearchOutcome,
    TargetHash,
};
use owo_colors::OwoColorize;
use tracing::info;

use crate::progress::ConsoleProgress;

/// Run a search over `targets`; returns whether a match was found
pub fn run(
    targets: Vec<EnumerationTarget>,
    target_hash: TargetHash,
    config: &SearchConfig,
) -> Result<bool> {
    let backend = CpuBackend::new(config.threads)?;
    info!(
        "Using CPU backend ({} threads, window size {})",
        backend.threads(),
        config.window_size
    );

    let mut search = SearchCoordinator::new(backend, target_hash, targets, config.window_size)?;
    let mut progress = ConsoleProgress::new(config.progress);

    match search.run(&mut progress)? {
        SearchOutcome::Found(found) => {
            progress.finish();
            print_match(&found);
            Ok(true)
        }
        SearchOutcome::Exhausted => {
            println!("Exhausted :(");
            Ok(false)
        }
    }
}

fn print_match(found: &SearchMatch) {
    println!("Found solution: {}", found.sequence.green().bold());
    println!("Target hashes: {}", found.hash);
}
