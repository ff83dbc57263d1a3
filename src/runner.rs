//! Conformance run orchestration.
//!
//! One sequential pass: the outer loop walks the corpus, the inner loop runs
//! every parser on the current case. All bookkeeping lives in the
//! [`RunSummary`] returned to the caller.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::command::ParserCommand;
use crate::config::HarnessConfig;
use crate::corpus::Corpus;
use crate::error::HarnessResult;
use crate::intent::{Intent, Judgement};
use crate::invoke::ParserInvoker;
use crate::progress::{Progress, ProgressReporter};

/// Per-parser results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserTally {
    pub parser: ParserCommand,
    pub accepted_correctly: usize,
    /// Cases this parser got wrong, in traversal order
    pub misclassified: Vec<PathBuf>,
}

impl ParserTally {
    pub fn new(parser: ParserCommand) -> Self {
        Self {
            parser,
            accepted_correctly: 0,
            misclassified: Vec::new(),
        }
    }

    fn record(&mut self, path: &Path, judgement: Judgement) {
        match judgement {
            Judgement::Correct => self.accepted_correctly += 1,
            Judgement::Misclassified => self.misclassified.push(path.to_path_buf()),
        }
    }

    /// Cases this parser has seen so far.
    pub fn checked(&self) -> usize {
        self.accepted_correctly + self.misclassified.len()
    }
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Non-skipped cases
    pub total: usize,
    /// Cases excluded by an ignore marker
    pub skipped: usize,
    pub tallies: Vec<ParserTally>,
}

impl RunSummary {
    /// True when no parser misclassified anything.
    pub fn all_correct(&self) -> bool {
        self.tallies.iter().all(|t| t.misclassified.is_empty())
    }
}

/// Run every configured parser over the corpus.
///
/// Stops at the first fatal error (unreadable file, parser that cannot be
/// launched); misclassifications are recorded and never stop the run.
#[tracing::instrument(skip_all, fields(source_dir = %config.source_dir.display(), parsers = config.parsers.len()))]
pub fn run(
    config: &HarnessConfig,
    invoker: &mut dyn ParserInvoker,
    reporter: &mut dyn ProgressReporter,
) -> HarnessResult<RunSummary> {
    if config.parsers.is_empty() {
        tracing::warn!("no parsers configured; cases will be counted but not checked");
    }
    warn_on_shared_reports(config);

    let mut summary = RunSummary {
        tallies: config.parsers.iter().cloned().map(ParserTally::new).collect(),
        ..RunSummary::default()
    };

    reporter.on_run_start(&config.source_dir, &config.parsers);

    let corpus = Corpus::new(&config.source_dir, &config.conventions);
    for case in corpus.cases() {
        let case = case?;
        let Intent::Expect(expectation) = case.intent else {
            tracing::debug!(path = %case.path.display(), "skipping ignored case");
            summary.skipped += 1;
            reporter.on_case_skipped(&case);
            continue;
        };

        summary.total += 1;
        for tally in &mut summary.tallies {
            let verdict = invoker.invoke(&tally.parser, &case)?;
            tally.record(&case.path, expectation.judge(verdict));
        }

        reporter.on_case_complete(&Progress {
            total: summary.total,
            tallies: &summary.tallies,
            path: &case.path,
        });
    }

    reporter.on_run_complete(&summary);
    tracing::info!(
        total = summary.total,
        skipped = summary.skipped,
        all_correct = summary.all_correct(),
        "run complete"
    );
    Ok(summary)
}

fn warn_on_shared_reports(config: &HarnessConfig) {
    let mut seen: HashMap<PathBuf, &ParserCommand> = HashMap::new();
    for parser in &config.parsers {
        let report = config.report_path(parser);
        if let Some(previous) = seen.insert(report.clone(), parser) {
            tracing::warn!(
                report = %report.display(),
                first = %previous,
                second = %parser,
                "parsers share a report file; the later one overwrites the earlier"
            );
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::corpus::TestCase;
    use crate::error::HarnessError;
    use crate::intent::Verdict;
    use crate::progress::SilentReporter;
    use std::fs;

    /// Invoker whose verdict is a function of the parser program and the case.
    struct Scripted<F> {
        decide: F,
        calls: Vec<(String, PathBuf)>,
    }

    impl<F: FnMut(&str, &TestCase) -> Verdict> Scripted<F> {
        fn new(decide: F) -> Self {
            Self {
                decide,
                calls: Vec::new(),
            }
        }
    }

    impl<F: FnMut(&str, &TestCase) -> Verdict> ParserInvoker for Scripted<F> {
        fn invoke(&mut self, parser: &ParserCommand, case: &TestCase) -> HarnessResult<Verdict> {
            self.calls.push((parser.program().to_string(), case.path.clone()));
            Ok((self.decide)(parser.program(), case))
        }
    }

    /// Reporter that records what it was told.
    #[derive(Default)]
    struct Recording {
        started: bool,
        skipped: Vec<PathBuf>,
        lines: Vec<(usize, Vec<usize>, PathBuf)>,
        finished: bool,
    }

    impl ProgressReporter for Recording {
        fn on_run_start(&mut self, _source_dir: &Path, _parsers: &[ParserCommand]) {
            self.started = true;
        }
        fn on_case_skipped(&mut self, case: &TestCase) {
            self.skipped.push(case.path.clone());
        }
        fn on_case_complete(&mut self, progress: &Progress<'_>) {
            let counts = progress.tallies.iter().map(|t| t.accepted_correctly).collect();
            self.lines.push((progress.total, counts, progress.path.to_path_buf()));
        }
        fn on_run_complete(&mut self, _summary: &RunSummary) {
            self.finished = true;
        }
    }

    fn corpus(files: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (rel, content) in files {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    fn config(dir: &Path, parsers: &[&str]) -> HarnessConfig {
        let parsers = parsers.iter().map(|p| ParserCommand::parse(p).unwrap()).collect();
        HarnessConfig::new(parsers, dir).with_report_dir(dir)
    }

    /// A parser that accepts everything not containing "syntax error"
    fn sensible(_program: &str, case: &TestCase) -> Verdict {
        Verdict::from_success(!case.source.contains("syntax error"))
    }

    #[test]
    fn test_accept_case_accepted_is_correct() {
        let dir = corpus(&[("good/a.rs", "fn main() {}\n")]);
        let config = config(dir.path(), &["always-ok"]);
        let mut invoker = Scripted::new(|_: &str, _: &TestCase| Verdict::Accepted);

        let summary = run(&config, &mut invoker, &mut SilentReporter).unwrap();

        assert_eq!(summary.total, 1);
        assert_eq!(summary.tallies[0].accepted_correctly, 1);
        assert!(summary.tallies[0].misclassified.is_empty());
        assert!(summary.all_correct());
    }

    #[test]
    fn test_parse_fail_case_accepted_is_misclassified() {
        let dir = corpus(&[("parse-fail/b.rs", "fn main( {}\n")]);
        let config = config(dir.path(), &["always-ok"]);
        let mut invoker = Scripted::new(|_: &str, _: &TestCase| Verdict::Accepted);

        let summary = run(&config, &mut invoker, &mut SilentReporter).unwrap();

        assert_eq!(summary.tallies[0].accepted_correctly, 0);
        assert_eq!(summary.tallies[0].misclassified, vec![dir.path().join("parse-fail/b.rs")]);
        assert!(!summary.all_correct());
    }

    #[test]
    fn test_ignored_case_is_never_invoked() {
        let dir = corpus(&[("good/c.rs", "// ignore-test\nfn main() {}\n")]);
        let config = config(dir.path(), &["always-fail"]);
        let mut invoker = Scripted::new(|_: &str, _: &TestCase| Verdict::Rejected);
        let mut reporter = Recording::default();

        let summary = run(&config, &mut invoker, &mut reporter).unwrap();

        assert_eq!(summary.total, 0);
        assert_eq!(summary.skipped, 1);
        assert!(summary.all_correct());
        assert!(invoker.calls.is_empty());
        assert_eq!(reporter.skipped, vec![dir.path().join("good/c.rs")]);
        assert!(reporter.lines.is_empty());
    }

    #[test]
    fn test_parsers_are_judged_independently() {
        let dir = corpus(&[("good/d.rs", "fn main() {}\n")]);
        let config = config(dir.path(), &["yes", "no"]);
        let mut invoker = Scripted::new(|program: &str, _: &TestCase| Verdict::from_success(program == "yes"));

        let summary = run(&config, &mut invoker, &mut SilentReporter).unwrap();

        assert_eq!(summary.tallies[0].parser.program(), "yes");
        assert!(summary.tallies[0].misclassified.is_empty());
        assert_eq!(summary.tallies[1].misclassified, vec![dir.path().join("good/d.rs")]);
        assert!(!summary.all_correct());
    }

    #[test]
    fn test_every_case_counted_exactly_once_per_parser() {
        let dir = corpus(&[
            ("run-pass/a.rs", "fn main() {}\n"),
            ("run-pass/b.rs", "syntax error\n"),
            ("parse-fail/c.rs", "syntax error\n"),
            ("parse-fail/d.rs", "fn main() {}\n"),
            ("run-pass/e.rs", "// ignore-lexer-test\nsyntax error\n"),
        ]);
        let config = config(dir.path(), &["p1", "p2", "p3"]);
        let mut invoker = Scripted::new(sensible);

        let summary = run(&config, &mut invoker, &mut SilentReporter).unwrap();

        assert_eq!(summary.total, 4);
        assert_eq!(summary.skipped, 1);
        for tally in &summary.tallies {
            assert_eq!(tally.checked(), summary.total);
            assert_eq!(tally.accepted_correctly, 2);
            assert_eq!(
                tally.misclassified,
                vec![dir.path().join("parse-fail/d.rs"), dir.path().join("run-pass/b.rs")]
            );
        }
        assert_eq!(invoker.calls.len(), 12);
    }

    #[test]
    fn test_invocation_order_is_case_major() {
        let dir = corpus(&[("a.rs", ""), ("b.rs", "")]);
        let config = config(dir.path(), &["first", "second"]);
        let mut invoker = Scripted::new(|_: &str, _: &TestCase| Verdict::Accepted);

        run(&config, &mut invoker, &mut SilentReporter).unwrap();

        let order: Vec<_> = invoker
            .calls
            .iter()
            .map(|(p, path)| format!("{}:{}", p, path.file_name().unwrap().to_string_lossy()))
            .collect();
        assert_eq!(order, vec!["first:a.rs", "second:a.rs", "first:b.rs", "second:b.rs"]);
    }

    #[test]
    fn test_progress_sees_running_counts() {
        let dir = corpus(&[("a.rs", ""), ("b.rs", "syntax error"), ("c.rs", "")]);
        let config = config(dir.path(), &["p"]);
        let mut invoker = Scripted::new(sensible);
        let mut reporter = Recording::default();

        run(&config, &mut invoker, &mut reporter).unwrap();

        assert!(reporter.started && reporter.finished);
        let seen: Vec<_> = reporter.lines.iter().map(|(total, counts, _)| (*total, counts.clone())).collect();
        assert_eq!(seen, vec![(1, vec![1]), (2, vec![1]), (3, vec![2])]);
        assert_eq!(reporter.lines[2].2, dir.path().join("c.rs"));
    }

    #[test]
    fn test_no_parsers_still_counts_cases() {
        let dir = corpus(&[("a.rs", ""), ("b.rs", "")]);
        let config = config(dir.path(), &[]);
        let mut invoker = Scripted::new(|_: &str, _: &TestCase| Verdict::Accepted);

        let summary = run(&config, &mut invoker, &mut SilentReporter).unwrap();

        assert_eq!(summary.total, 2);
        assert!(summary.tallies.is_empty());
        assert!(summary.all_correct());
    }

    #[test]
    fn test_invoker_error_aborts_run() {
        struct Broken;
        impl ParserInvoker for Broken {
            fn invoke(&mut self, parser: &ParserCommand, _case: &TestCase) -> HarnessResult<Verdict> {
                Err(HarnessError::Launch {
                    program: parser.program().to_string(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
            }
        }

        let dir = corpus(&[("a.rs", "")]);
        let config = config(dir.path(), &["missing"]);

        let err = run(&config, &mut Broken, &mut SilentReporter).unwrap_err();
        assert!(matches!(err, HarnessError::Launch { .. }));
    }
}
