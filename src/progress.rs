//! Progress reporting.
//!
//! ## ProgressReporter Trait
//!
//! The runner reports progress through a `ProgressReporter` so the live
//! status line can be replaced (or silenced) without touching the run itself.
//! Reporters only observe: nothing they do changes the results.

use std::io::{self, Write};
use std::path::Path;

use crate::command::ParserCommand;
use crate::corpus::TestCase;
use crate::runner::{ParserTally, RunSummary};

/// Snapshot of the run after a test case has been checked by every parser.
pub struct Progress<'a> {
    /// Non-skipped cases processed so far
    pub total: usize,
    /// Running tallies, one per parser, in command-line order
    pub tallies: &'a [ParserTally],
    /// The case that was just checked
    pub path: &'a Path,
}

/// Observer for a conformance run.
pub trait ProgressReporter {
    /// Called once before the corpus is walked
    fn on_run_start(&mut self, _source_dir: &Path, _parsers: &[ParserCommand]) {}

    /// Called for each file excluded by an ignore marker
    fn on_case_skipped(&mut self, _case: &TestCase) {}

    /// Called after every parser has seen a case
    fn on_case_complete(&mut self, progress: &Progress<'_>);

    /// Called once after the last case
    fn on_run_complete(&mut self, _summary: &RunSummary) {}
}

/// Reporter that prints nothing.
#[derive(Debug, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn on_case_complete(&mut self, _progress: &Progress<'_>) {}
}

/// Single status line, redrawn in place after every case.
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Render the status line for `progress` (without the redraw prefix).
pub fn status_line(progress: &Progress<'_>) -> String {
    let tallies = progress
        .tallies
        .iter()
        .map(|t| format!("{}: {}", t.parser, t.accepted_correctly))
        .collect::<Vec<_>>()
        .join(", ");
    if tallies.is_empty() {
        format!("total: {}, scanned {}", progress.total, progress.path.display())
    } else {
        format!("total: {}, {}, scanned {}", progress.total, tallies, progress.path.display())
    }
}

impl<W: Write> ProgressReporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, _source_dir: &Path, _parsers: &[ParserCommand]) {
        let _ = writeln!(self.out);
    }

    fn on_case_complete(&mut self, progress: &Progress<'_>) {
        // Return to column 0 and clear the previous line before redrawing
        let _ = write!(self.out, "\r\x1b[K {}", status_line(progress));
        let _ = self.out.flush();
    }

    fn on_run_complete(&mut self, _summary: &RunSummary) {
        let _ = write!(self.out, "\n\n");
        let _ = self.out.flush();
    }
}
