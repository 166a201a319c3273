//! Console progress display.
//!
//! Prints a header per target, then redraws a single `Progress: NN.NN%`
//! line in place after each window.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use hash_search_core::{EnumerationTarget, ProgressObserver};

/// Percentage of `space` covered by `searched` candidates
pub fn progress_percent(searched: u64, space: u64) -> f64 {
    if space == 0 {
        return 100.0;
    }
    searched as f64 / space as f64 * 100.0
}

pub fn format_progress(percent: f64) -> String {
    format!("Progress: {:.2}%", percent)
}

pub struct ConsoleProgress {
    enabled: bool,
    out: Stdout,
}

impl ConsoleProgress {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            out: io::stdout(),
        }
    }

    /// Show 100% after a match ends the search early
    pub fn finish(&mut self) {
        if self.enabled {
            self.redraw(100.0).ok();
        }
    }

    fn redraw(&mut self, percent: f64) -> io::Result<()> {
        queue!(
            self.out,
            MoveUp(1),
            Clear(ClearType::CurrentLine),
            MoveToColumn(0),
            Print(format_progress(percent)),
            Print("\n")
        )?;
        self.out.flush()
    }
}

impl ProgressObserver for ConsoleProgress {
    fn target_started(&mut self, target: &EnumerationTarget, _space: u64) {
        println!("Searching sequences of {}...", target);
        if self.enabled {
            // line reserved for the progress redraw
            println!();
        }
    }

    fn window_completed(&mut self, _target: &EnumerationTarget, searched: u64, space: u64) {
        if self.enabled {
            self.redraw(progress_percent(searched, space)).ok();
        }
    }
}
