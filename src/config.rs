//! Harness configuration.
//!
//! The corpus conventions (which files are test cases, which are expected to
//! fail, which are ignored) are plain data here so the runner never hardcodes
//! them. The defaults match the layout of the Rust test suite.

use std::path::PathBuf;

use crate::command::ParserCommand;

/// Extension of files treated as test cases.
pub const DEFAULT_SOURCE_EXTENSION: &str = "rs";

/// Path substring marking a fixture that every parser must reject.
pub const DEFAULT_PARSE_FAIL_MARKER: &str = "parse-fail";

/// Line substrings that exclude a file from the run.
pub const DEFAULT_IGNORE_MARKERS: [&str; 2] = ["ignore-test", "ignore-lexer-test"];

/// Extension of the per-parser failure list.
pub const DEFAULT_REPORT_SUFFIX: &str = "bad";

/// Conventions used to turn files into test cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    pub source_extension: String,
    pub parse_fail_marker: String,
    pub ignore_markers: Vec<String>,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            parse_fail_marker: DEFAULT_PARSE_FAIL_MARKER.to_string(),
            ignore_markers: DEFAULT_IGNORE_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Everything a conformance run needs.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Parsers under test, in command-line order
    pub parsers: Vec<ParserCommand>,
    /// Root of the corpus
    pub source_dir: PathBuf,
    /// Directory the `.bad` reports are written to
    pub report_dir: PathBuf,
    /// Extension appended to each parser's report file
    pub report_suffix: String,
    pub conventions: Conventions,
}

impl HarnessConfig {
    /// Create a configuration with the default conventions, reporting into the
    /// current working directory.
    pub fn new(parsers: Vec<ParserCommand>, source_dir: impl Into<PathBuf>) -> Self {
        Self {
            parsers,
            source_dir: source_dir.into(),
            report_dir: PathBuf::from("."),
            report_suffix: DEFAULT_REPORT_SUFFIX.to_string(),
            conventions: Conventions::default(),
        }
    }

    /// Write reports somewhere other than the working directory.
    pub fn with_report_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.report_dir = dir.into();
        self
    }

    /// Path of the failure list for `parser`.
    pub fn report_path(&self, parser: &ParserCommand) -> PathBuf {
        self.report_dir.join(parser.report_file_name(&self.report_suffix))
    }
}
