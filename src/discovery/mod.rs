//! Test discovery over files and directory trees.

pub mod utils;

pub use utils::{is_test_file, walk_test_files, WalkOptions, DEFAULT_EXCLUDED_DIRS, TEST_FILE_SUFFIX};

use std::fs;
use std::path::Path;

use tracing::{debug, info, trace, warn};

use crate::engine::{
    Diagnostic, DiscoveryConfig, DiscoveryMode, Engine, FileDiscovery, SkipReason, TestCase,
};
use crate::error::{DiscoveryError, IoError, Result};
use crate::parser::GoParser;

/// Parses and discovers files one after another, reusing one parser.
pub struct Discoverer {
    parser: GoParser,
    engine: Engine,
}

impl Discoverer {
    pub fn new(config: DiscoveryConfig) -> Result<Self> {
        Ok(Self {
            parser: GoParser::new()?,
            engine: Engine::new(config),
        })
    }

    pub fn config(&self) -> &DiscoveryConfig {
        self.engine.config()
    }

    pub fn discover_file(&mut self, path: &Path, mode: DiscoveryMode) -> Result<FileDiscovery> {
        if !path.is_file() {
            return Err(IoError::file_not_found(path).into());
        }
        let bytes = fs::read(path).map_err(|e| IoError::read_error(path, e))?;
        let tree = self.parser.parse_bytes(&bytes, path)?;
        let found = self.engine.discover(&tree, path, mode);

        if self.config().strict {
            if let Some(fault) = found.diagnostics.iter().find(|d| d.is_fault()) {
                return Err(strict_violation(path, fault).into());
            }
        }

        debug!(
            path = %path.display(),
            tests = found.tests.len(),
            skipped = found.diagnostics.len(),
            "discovered file"
        );
        trace!(names = ?found.names(), "discovered names");
        Ok(found)
    }

    /// Test cases from every test file under `root`, in path order. A file
    /// that fails to read, parse or pass strict mode is logged and left out.
    pub fn discover_dir(
        &mut self,
        root: &Path,
        mode: DiscoveryMode,
        options: &WalkOptions,
    ) -> Result<Vec<TestCase>> {
        if root.is_file() {
            return Ok(self.discover_file(root, mode)?.tests);
        }
        if !root.is_dir() {
            return Err(IoError::directory_not_found(root).into());
        }

        let files = walk_test_files(root, options)?;
        info!(root = %root.display(), files = files.len(), "discovering tests");

        let mut tests = Vec::new();
        for file in &files {
            match self.discover_file(file, mode) {
                Ok(mut found) => tests.append(&mut found.tests),
                Err(e) => warn!(path = %file.display(), error = %e, "skipping file"),
            }
        }
        Ok(tests)
    }
}

pub fn discover_file(
    path: &Path,
    mode: DiscoveryMode,
    config: &DiscoveryConfig,
) -> Result<FileDiscovery> {
    Discoverer::new(config.clone())?.discover_file(path, mode)
}

pub fn discover_dir(
    root: &Path,
    mode: DiscoveryMode,
    config: &DiscoveryConfig,
    options: &WalkOptions,
) -> Result<Vec<TestCase>> {
    Discoverer::new(config.clone())?.discover_dir(root, mode, options)
}

fn strict_violation(path: &Path, fault: &Diagnostic) -> DiscoveryError {
    match &fault.reason {
        SkipReason::UnexpectedShape { expected, found } => {
            DiscoveryError::strict_violation(path, fault.line, *expected, *found)
        }
        other => DiscoveryError::strict_violation(path, fault.line, "node", other.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const TABLE_WITH_ODD_ROW: &str = r#"package p

import "testing"

func TestTable(t *testing.T) {
	tests := []struct{ name string }{
		{name: "ok"},
		row,
	}
	for _, tt := range tests {
		t.Run(tt.name, func(t *testing.T) {})
	}
}
"#;

    #[test]
    fn test_discover_file_lenient() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t_test.go");
        fs::write(&path, TABLE_WITH_ODD_ROW).unwrap();

        let found = discover_file(&path, DiscoveryMode::Tests, &DiscoveryConfig::default()).unwrap();
        assert_eq!(found.names(), vec!["TestTable", "TestTable/ok"]);
        assert_eq!(found.fault_count(), 1);
    }

    #[test]
    fn test_discover_file_strict() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("t_test.go");
        fs::write(&path, TABLE_WITH_ODD_ROW).unwrap();

        let config = DiscoveryConfig::default().strict(true);
        let err = discover_file(&path, DiscoveryMode::Tests, &config).unwrap_err();
        assert!(matches!(
            err,
            Error::Discovery(DiscoveryError::StrictViolation { line: 8, .. })
        ));
    }

    #[test]
    fn test_discover_missing_file() {
        let err = discover_file(
            Path::new("/definitely/not/here_test.go"),
            DiscoveryMode::Tests,
            &DiscoveryConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Io(IoError::FileNotFound { .. })));
    }

    #[test]
    fn test_discover_dir_skips_bad_files() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("a_test.go"),
            "package p\n\nfunc TestA(t *testing.T) {}\n",
        )
        .unwrap();
        fs::write(dir.path().join("b_test.go"), [0xffu8, 0xfe, 0xfd]).unwrap();

        let tests = discover_dir(
            dir.path(),
            DiscoveryMode::Tests,
            &DiscoveryConfig::default(),
            &WalkOptions::default(),
        )
        .unwrap();
        let names: Vec<_> = tests.iter().map(|t| t.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["TestA"]);
    }
}
