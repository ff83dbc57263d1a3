//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, Write};

use crate::config::HarnessConfig;
use crate::invoke::{ParserInvoker, ProcessInvoker};
use crate::progress::{ConsoleReporter, ProgressReporter};
use crate::{report, runner};

use super::{CliError, CliResult, ExitCode};

/// Check every configured parser against the corpus, printing progress and
/// the summary to stdout.
pub fn check_corpus(config: &HarnessConfig) -> CliResult<ExitCode> {
    let mut reporter = ConsoleReporter::stdout();
    let stdout = io::stdout();
    check_corpus_with(config, &mut ProcessInvoker, &mut reporter, &mut stdout.lock())
}

/// [`check_corpus`] with the invoker, progress reporter and summary sink supplied by the caller.
///
/// Reports for every parser are written before the exit code is chosen.
pub fn check_corpus_with(
    config: &HarnessConfig,
    invoker: &mut dyn ParserInvoker,
    reporter: &mut dyn ProgressReporter,
    out: &mut impl Write,
) -> CliResult<ExitCode> {
    let summary = runner::run(config, invoker, reporter)?;
    report::write_reports(config, &summary)?;
    report::print_summary(config, &summary, out)
        .and_then(|()| out.flush())
        .map_err(|e| CliError::failure(format!("Error writing summary: {}", e)))?;

    if summary.all_correct() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
