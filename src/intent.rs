//! Test-intent inference.
//!
//! Whether a file is a test case at all, and what a correct parser must do
//! with it, is decided purely from naming and comment conventions:
//!
//! - a line containing an ignore marker removes the file from the run
//! - a path containing the parse-fail marker must be rejected
//! - every other file must be accepted

use std::path::Path;

use crate::config::Conventions;

/// What a correct parser does with a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Accept,
    Reject,
}

/// What a parser actually did with a test case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    pub fn from_success(success: bool) -> Self {
        if success { Verdict::Accepted } else { Verdict::Rejected }
    }
}

/// Outcome of comparing a verdict against the expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgement {
    Correct,
    Misclassified,
}

impl Expectation {
    pub fn judge(self, verdict: Verdict) -> Judgement {
        match (self, verdict) {
            (Expectation::Accept, Verdict::Accepted) | (Expectation::Reject, Verdict::Rejected) => Judgement::Correct,
            _ => Judgement::Misclassified,
        }
    }
}

/// Classification of one discovered file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Skip,
    Expect(Expectation),
}

/// Classify a file from its path and content.
pub fn classify(path: &Path, content: &str, conventions: &Conventions) -> Intent {
    if is_ignored(content, &conventions.ignore_markers) {
        return Intent::Skip;
    }
    Intent::Expect(expectation_for(path, &conventions.parse_fail_marker))
}

fn is_ignored(content: &str, markers: &[String]) -> bool {
    content
        .lines()
        .any(|line| markers.iter().any(|marker| line.contains(marker.as_str())))
}

fn expectation_for(path: &Path, parse_fail_marker: &str) -> Expectation {
    if path.to_string_lossy().contains(parse_fail_marker) {
        Expectation::Reject
    } else {
        Expectation::Accept
    }
}
