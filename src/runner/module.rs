use std::path::{Path, PathBuf};

use crate::error::RunnerError;

pub const GO_MOD_FILE: &str = "go.mod";

/// Directory a test lives in: the path itself for directories, the parent
/// for files.
pub fn test_directory(path: &Path) -> PathBuf {
    if path.is_dir() || path.extension().is_none() {
        return path.to_path_buf();
    }
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Nearest ancestor of `start` (inclusive) holding a `go.mod`.
pub fn find_module_root(start: &Path) -> Result<PathBuf, RunnerError> {
    start
        .ancestors()
        .find(|dir| dir.join(GO_MOD_FILE).is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| RunnerError::missing_module(start))
}

/// Path of `dir` relative to the module root, as `go test` expects it.
///
/// The module root itself is `./.`; with nothing selected it becomes
/// `./...` so every package runs.
pub fn package_path(dir: &Path, module_root: &Path, run_all: bool) -> String {
    let relative = relative_to(dir, module_root);
    if relative.is_empty() {
        return if run_all { "./...".to_string() } else { "./.".to_string() };
    }
    format!("./{relative}")
}

/// `file` relative to the module root with forward slashes.
pub fn relative_to(file: &Path, module_root: &Path) -> String {
    let relative = file.strip_prefix(module_root).unwrap_or(file);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
