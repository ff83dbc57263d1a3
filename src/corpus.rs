//! Corpus discovery.
//!
//! Walks the source directory and yields every file with the configured
//! extension, loaded as UTF-8 text. Entries are visited in file-name order
//! within each directory so reports are stable from run to run.

use std::fs;
use std::path::PathBuf;

use walkdir::{DirEntry, WalkDir};

use crate::config::Conventions;
use crate::error::{HarnessError, HarnessResult};
use crate::intent::{self, Intent};

/// One discovered source file.
#[derive(Debug, Clone)]
pub struct TestCase {
    pub path: PathBuf,
    pub source: String,
    pub intent: Intent,
}

/// A directory of test cases.
pub struct Corpus<'a> {
    root: PathBuf,
    conventions: &'a Conventions,
}

impl<'a> Corpus<'a> {
    pub fn new(root: impl Into<PathBuf>, conventions: &'a Conventions) -> Self {
        Self {
            root: root.into(),
            conventions,
        }
    }

    /// Lazily walk the corpus.
    ///
    /// Files are read one at a time as the iterator advances. The first walk,
    /// read or decode failure is yielded as an error; callers treat it as fatal.
    pub fn cases(&self) -> impl Iterator<Item = HarnessResult<TestCase>> + '_ {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) if self.is_source_file(&entry) => Some(self.load(entry.into_path())),
                Ok(_) => None,
                Err(source) => Some(Err(HarnessError::Walk {
                    root: self.root.clone(),
                    source,
                })),
            })
    }

    fn is_source_file(&self, entry: &DirEntry) -> bool {
        let file_type = entry.file_type();
        // Symlinks are kept unless they lead to a directory, so a dangling link fails in `load`
        let is_file = file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir());
        is_file
            && entry
                .path()
                .extension()
                .is_some_and(|ext| ext == self.conventions.source_extension.as_str())
    }

    fn load(&self, path: PathBuf) -> HarnessResult<TestCase> {
        let source = fs::read_to_string(&path).map_err(|source| HarnessError::Read {
            path: path.clone(),
            source,
        })?;
        let intent = intent::classify(&path, &source, self.conventions);
        tracing::debug!(path = %path.display(), ?intent, "discovered test case");
        Ok(TestCase { path, source, intent })
    }
}
