use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::error::IoError;

pub const TEST_FILE_SUFFIX: &str = "_test.go";

pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["vendor", "testdata", "node_modules"];

/// Which directories a walk descends into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkOptions {
    pub exclude_dirs: Vec<String>,
    pub include_hidden: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            include_hidden: false,
        }
    }
}

impl WalkOptions {
    fn skips_dir(&self, name: &str) -> bool {
        if !self.include_hidden && name.starts_with('.') {
            return true;
        }
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(TEST_FILE_SUFFIX))
}

/// Every Go test file under `root`, sorted by path.
///
/// Unreadable entries below the root are logged and skipped; failing to read
/// the root itself is an error.
pub fn walk_test_files(root: &Path, options: &WalkOptions) -> Result<Vec<PathBuf>, IoError> {
    let mut files = Vec::new();

    // The root is always walked, even when its own name looks hidden.
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        !options.skips_dir(&e.file_name().to_string_lossy())
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(IoError::walk_error(root, e.to_string()));
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_test_file(entry.path()) {
            continue;
        }
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if hidden && !options.include_hidden {
            continue;
        }
        files.push(entry.into_path());
    }

    files.sort();
    Ok(files)
}
