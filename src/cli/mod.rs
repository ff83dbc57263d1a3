//! CLI module for parsecheck
//!
//! ## Usage
//!
//! ```text
//! parsecheck -p ./my-parser "other-parser --strict" -s path/to/tests
//! ```
//!
//! Each `-p` value is one parser command (program plus arguments). Every
//! `.rs` file under the source directory is piped to every parser; the exit
//! status is compared against the file's expected outcome.
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::command::ParserCommand;
use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::version::PARSECHECK_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<HarnessError> for CliError {
    /// Render the harness error (with its source chain and help) through miette.
    fn from(err: HarnessError) -> Self {
        CliError::failure(format!("{:?}", miette::Report::new(err)))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Check that external parsers accept valid sources and reject parse-fail fixtures
#[derive(Parser, Debug)]
#[command(name = "parsecheck")]
#[command(version = PARSECHECK_VERSION)]
#[command(about = "Check external parsers against a corpus of source files", long_about = None)]
pub struct Cli {
    /// Parser command(s) to test; each value is a program plus its arguments
    #[arg(short = 'p', long = "parser", value_name = "PARSER", num_args = 1..)]
    pub parsers: Vec<String>,

    /// Directory scanned recursively for test cases
    #[arg(short = 's', long = "source-dir", value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,
}

impl Cli {
    /// Build the run configuration; reports go to the working directory.
    pub fn into_config(self) -> HarnessResult<HarnessConfig> {
        let parsers = self
            .parsers
            .iter()
            .map(|raw| ParserCommand::parse(raw))
            .collect::<HarnessResult<Vec<_>>>()?;
        Ok(HarnessConfig::new(parsers, self.source_dir))
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.into_config()?;
    commands::check_corpus(&config)
}

// ============================================================================
// Tests
// ============================================================================
