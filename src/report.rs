//! Failure lists and the end-of-run summary.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::runner::{ParserTally, RunSummary};

/// Write one `<program>.bad` file per parser, replacing any previous contents.
///
/// Every report is written, including empty ones, before the caller decides
/// the exit status. Returns the paths written in parser order.
pub fn write_reports(config: &HarnessConfig, summary: &RunSummary) -> HarnessResult<Vec<PathBuf>> {
    summary
        .tallies
        .iter()
        .map(|tally| {
            let path = config.report_path(&tally.parser);
            write_failure_list(&path, tally).map_err(|source| HarnessError::Report {
                path: path.clone(),
                source,
            })?;
            tracing::debug!(report = %path.display(), failures = tally.misclassified.len(), "wrote report");
            Ok(path)
        })
        .collect()
}

fn write_failure_list(path: &Path, tally: &ParserTally) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for case in &tally.misclassified {
        write_path(&mut out, case)?;
        out.write_all(b"\n")?;
    }
    out.flush()
}

/// Write the raw path bytes so non-UTF-8 names survive the report.
#[cfg(unix)]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    use std::os::unix::ffi::OsStrExt;
    out.write_all(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn write_path(out: &mut impl Write, path: &Path) -> io::Result<()> {
    write!(out, "{}", path.display())
}

/// Print each parser's misclassified cases and a one-line summary.
pub fn print_summary(config: &HarnessConfig, summary: &RunSummary, out: &mut impl Write) -> io::Result<()> {
    for tally in &summary.tallies {
        let report = tally.parser.report_file_name(&config.report_suffix);
        writeln!(
            out,
            "writing {} files that did not yield the correct result with {} to {}",
            tally.misclassified.len(),
            tally.parser,
            report
        )?;
        writeln!(out)?;
        for case in &tally.misclassified {
            writeln!(out, "bad test: {}", case.display())?;
        }
    }
    Ok(())
}
