//! Parser invocation boundary.
//!
//! The runner never spawns processes itself: it asks a [`ParserInvoker`] for a
//! verdict. [`ProcessInvoker`] is the real implementation; tests supply
//! scripted invokers instead of external programs.

use std::fs::File;
use std::io;
use std::process::{Command, Stdio};

use crate::command::ParserCommand;
use crate::corpus::TestCase;
use crate::error::{HarnessError, HarnessResult};
use crate::intent::Verdict;

/// Run a parser against a test case and report whether it accepted the input.
pub trait ParserInvoker {
    fn invoke(&mut self, parser: &ParserCommand, case: &TestCase) -> HarnessResult<Verdict>;
}

/// Runs each parser as a child process.
///
/// The test file is opened fresh as the child's stdin for every invocation.
/// The child's stdout and stderr go to the null device so its diagnostics never
/// reach the progress line.
#[derive(Debug, Default)]
pub struct ProcessInvoker;

impl ParserInvoker for ProcessInvoker {
    fn invoke(&mut self, parser: &ParserCommand, case: &TestCase) -> HarnessResult<Verdict> {
        let input = File::open(&case.path).map_err(|source| HarnessError::Read {
            path: case.path.clone(),
            source,
        })?;

        let launch_error = |source: io::Error| HarnessError::Launch {
            program: parser.program().to_string(),
            source,
        };

        let status = Command::new(parser.program())
            .args(parser.args())
            .stdin(Stdio::from(input))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(launch_error)?;

        let verdict = Verdict::from_success(status.success());
        tracing::debug!(
            parser = %parser,
            path = %case.path.display(),
            code = ?status.code(),
            ?verdict,
            "parser finished"
        );
        Ok(verdict)
    }
}
