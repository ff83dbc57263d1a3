//! Fatal harness errors.
//!
//! A misclassified test case is *not* an error: it is recorded in the run
//! summary. Everything in this module aborts the run.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors that abort a conformance run.
#[derive(Debug, Error, Diagnostic)]
pub enum HarnessError {
    #[error("empty parser command")]
    #[diagnostic(
        code(parsecheck::config::empty_command),
        help("pass the parser program (and its arguments) as one value, e.g. -p \"./my-parser --strict\"")
    )]
    EmptyCommand,

    #[error("failed to walk source directory {}", root.display())]
    #[diagnostic(code(parsecheck::corpus::walk))]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read {}", path.display())]
    #[diagnostic(
        code(parsecheck::corpus::read),
        help("test files must be readable and valid UTF-8")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to run parser `{program}`")]
    #[diagnostic(
        code(parsecheck::invoke::launch),
        help("check that the parser program exists and is executable")
    )]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write report {}", path.display())]
    #[diagnostic(code(parsecheck::report::write))]
    Report {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type HarnessResult<T> = Result<T, HarnessError>;
