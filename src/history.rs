//! Run history: one JSON object per line in `~/.go-test-history`.

use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::error::RunnerError;
use crate::runner::{RunOutcome, TestCommand};

pub const HISTORY_FILE: &str = ".go-test-history";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
    #[serde(default)]
    pub passed: bool,
}

impl HistoryEntry {
    pub fn command(&self) -> TestCommand {
        TestCommand {
            program: self.program.clone(),
            args: self.args.clone(),
            dir: self.dir.clone(),
        }
    }
}

impl From<&RunOutcome> for HistoryEntry {
    fn from(outcome: &RunOutcome) -> Self {
        Self {
            program: outcome.command.program.clone(),
            args: outcome.command.args.clone(),
            dir: outcome.command.dir.clone(),
            passed: outcome.passed,
        }
    }
}

pub struct History {
    path: PathBuf,
}

impl History {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History in the user's home directory.
    pub fn open_default() -> Result<Self, RunnerError> {
        let home = dirs::home_dir().ok_or(RunnerError::NoHomeDirectory)?;
        Ok(Self::at(home.join(HISTORY_FILE)))
    }

    pub fn append(&self, entry: &HistoryEntry) -> Result<(), RunnerError> {
        let line = serde_json::to_string(entry)
            .map_err(|e| RunnerError::history(&self.path, e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RunnerError::history(&self.path, e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| RunnerError::history(&self.path, e.to_string()))?;
        debug!(path = %self.path.display(), "recorded run");
        Ok(())
    }

    /// Entries oldest first. A missing file is an empty history; lines that
    /// do not parse are skipped.
    pub fn all(&self) -> Result<Vec<HistoryEntry>, RunnerError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RunnerError::history(&self.path, e.to_string())),
        };

        let mut entries = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(entry) => entries.push(entry),
                Err(e) => warn!(line = index + 1, error = %e, "skipping malformed history line"),
            }
        }
        Ok(entries)
    }

    pub fn newest_first(&self) -> Result<Vec<HistoryEntry>, RunnerError> {
        let mut entries = self.all()?;
        entries.reverse();
        Ok(entries)
    }

    pub fn last(&self) -> Result<Option<HistoryEntry>, RunnerError> {
        Ok(self.all()?.pop())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn entry(filter: &str, passed: bool) -> HistoryEntry {
        HistoryEntry {
            program: "go".to_string(),
            args: vec!["test".into(), "./pkg".into(), "-run".into(), filter.into()],
            dir: PathBuf::from("/m"),
            passed,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let history = History::at(dir.path().join(HISTORY_FILE));
        assert!(history.all().unwrap().is_empty());
        assert_eq!(history.last().unwrap(), None);
    }

    #[test]
    fn test_append_and_read_back() {
        let dir = TempDir::new().unwrap();
        let history = History::at(dir.path().join(HISTORY_FILE));
        history.append(&entry("^TestA$", true)).unwrap();
        history.append(&entry("^TestB$", false)).unwrap();

        assert_eq!(history.all().unwrap().len(), 2);
        assert_eq!(history.last().unwrap(), Some(entry("^TestB$", false)));
        assert_eq!(history.newest_first().unwrap()[1], entry("^TestA$", true));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(HISTORY_FILE);
        let good = serde_json::to_string(&entry("^TestA$", true)).unwrap();
        fs::write(&path, format!("not json\n{good}\n\n")).unwrap();

        assert_eq!(History::at(path).all().unwrap(), vec![entry("^TestA$", true)]);
    }

    #[test]
    fn test_entry_without_passed_field() {
        let parsed: HistoryEntry =
            serde_json::from_str(r#"{"program":"go","args":["test"],"dir":"/m"}"#).unwrap();
        assert!(!parsed.passed);
        assert_eq!(parsed.command().to_string(), "go test");
    }
}
