use std::io::Write;
use tempfile::NamedTempFile;

use crate::error::RunnerError;

/// Delve init script: break at the test and continue to it.
pub fn breakpoint_script(file: &str, line: usize) -> String {
    format!("b {file}:{line}\nc\n")
}

/// Writes the init script to a temporary file, removed when dropped.
pub fn write_init_script(contents: &str) -> Result<NamedTempFile, RunnerError> {
    let mut file = tempfile::Builder::new()
        .prefix("go-test_")
        .tempfile()
        .map_err(RunnerError::temp_file)?;
    file.write_all(contents.as_bytes())
        .map_err(RunnerError::temp_file)?;
    file.flush().map_err(RunnerError::temp_file)?;
    Ok(file)
}
