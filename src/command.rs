//! Parser invocation commands.

use std::fmt;
use std::path::Path;

use crate::error::{HarnessError, HarnessResult};

/// One parser under test: a program plus the arguments it is always run with.
///
/// Parsed from a single whitespace-separated command string, e.g.
/// `"./target/debug/lexer --check"`. The raw string is kept for display
/// so summaries name the parser exactly as the user wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserCommand {
    raw: String,
    program: String,
    args: Vec<String>,
}

impl ParserCommand {
    /// Split `raw` on whitespace into program and arguments.
    pub fn parse(raw: &str) -> HarnessResult<Self> {
        let mut tokens = raw.split_whitespace().map(str::to_string);
        let program = tokens.next().ok_or(HarnessError::EmptyCommand)?;
        Ok(Self {
            raw: raw.trim().to_string(),
            program,
            args: tokens.collect(),
        })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Name of this parser's failure list: the program's base name plus `suffix`.
    pub fn report_file_name(&self, suffix: &str) -> String {
        let base = Path::new(&self.program)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.clone());
        format!("{}.{}", base, suffix)
    }
}

impl fmt::Display for ParserCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
