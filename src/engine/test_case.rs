use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::outcome::Diagnostic;

pub const PATH_DELIMITER: char = '/';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscoveryMode {
    Tests,
    Benchmarks,
}

/// One runnable test, benchmark or subtest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestCase {
    /// Path segments from the root entry, joined by `/`.
    pub qualified_name: String,
    pub source_file: PathBuf,
    /// Best effort: the launch call or table row for subtests.
    pub source_line: usize,
    pub is_benchmark: bool,
}

impl TestCase {
    pub fn new(
        qualified_name: impl Into<String>,
        source_file: impl Into<PathBuf>,
        source_line: usize,
        is_benchmark: bool,
    ) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            source_file: source_file.into(),
            source_line,
            is_benchmark,
        }
    }
}

/// Joins an enclosing qualified name and one more segment.
pub fn qualify(enclosing: &str, segment: &str) -> String {
    format!("{enclosing}{PATH_DELIMITER}{segment}")
}

/// Everything a discovery pass determined for one file.
#[derive(Debug, Clone, Default)]
pub struct FileDiscovery {
    pub file: PathBuf,
    pub tests: Vec<TestCase>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileDiscovery {
    pub fn new(file: &Path) -> Self {
        Self {
            file: file.to_path_buf(),
            tests: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn fault_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_fault()).count()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.qualified_name.as_str()).collect()
    }
}
