#![forbid(unsafe_code)]
//! parsecheck: a conformance driver for external parsers.
//!
//! Walks a corpus of source files, pipes each one to every parser under test
//! and compares the exit status with what the file's location says it should
//! be: files under a `parse-fail` path must be rejected, everything else must
//! be accepted. Files carrying an ignore marker are left out.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` with `?` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod command;
pub mod config;
pub mod corpus;
pub mod error;
pub mod intent;
pub mod invoke;
pub mod progress;
pub mod report;
pub mod runner;
pub mod version;

pub use command::ParserCommand;
pub use config::{Conventions, HarnessConfig};
pub use error::{HarnessError, HarnessResult};
pub use intent::{Expectation, Intent, Judgement, Verdict};
pub use invoke::{ParserInvoker, ProcessInvoker};
pub use progress::{ConsoleReporter, ProgressReporter, SilentReporter};
pub use runner::{ParserTally, RunSummary};
