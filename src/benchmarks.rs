//! Stored benchmark results: one JSON object per line in
//! `~/.go-test-benchmarks`, keyed by benchmark name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::engine::TestCase;
use crate::error::RunnerError;
use crate::runner::RunOutcome;

pub const BENCHMARK_FILE: &str = ".go-test-benchmarks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Benchmark name, or the package directory when every benchmark ran.
    pub key: String,
    pub recorded_at: DateTime<Utc>,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_profile: Option<PathBuf>,
}

impl BenchmarkResult {
    /// A result worth keeping: only passing runs with captured output.
    pub fn from_outcome(bench: Option<&TestCase>, outcome: &RunOutcome) -> Option<Self> {
        if !outcome.passed {
            return None;
        }
        let output = outcome.output.clone()?;
        let key = match bench {
            Some(bench) => bench.qualified_name.clone(),
            None => outcome.command.dir.to_string_lossy().to_string(),
        };
        Some(Self {
            key,
            recorded_at: Utc::now(),
            output,
            cpu_profile: outcome.cpu_profile.clone(),
        })
    }

    /// The `BenchmarkX-8  1000  123 ns/op` rows of the output.
    pub fn result_lines(&self) -> Vec<&str> {
        self.output
            .lines()
            .filter(|line| line.starts_with("Benchmark") && line.contains("/op"))
            .collect()
    }
}

pub struct BenchmarkStore {
    path: PathBuf,
}

impl BenchmarkStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self, RunnerError> {
        let home = dirs::home_dir().ok_or(RunnerError::NoHomeDirectory)?;
        Ok(Self::at(home.join(BENCHMARK_FILE)))
    }

    pub fn append(&self, result: &BenchmarkResult) -> Result<(), RunnerError> {
        let line = serde_json::to_string(result)
            .map_err(|e| RunnerError::benchmark_store(&self.path, e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RunnerError::benchmark_store(&self.path, e.to_string()))?;
        writeln!(file, "{line}")
            .map_err(|e| RunnerError::benchmark_store(&self.path, e.to_string()))?;
        debug!(key = %result.key, path = %self.path.display(), "stored benchmark result");
        Ok(())
    }

    /// Results oldest first; unreadable lines are skipped.
    pub fn all(&self) -> Result<Vec<BenchmarkResult>, RunnerError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(RunnerError::benchmark_store(&self.path, e.to_string())),
        };

        let mut results = Vec::new();
        for (index, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str(line) {
                Ok(result) => results.push(result),
                Err(e) => warn!(line = index + 1, error = %e, "skipping malformed benchmark result"),
            }
        }
        Ok(results)
    }

    /// Every benchmark with at least one stored run, in first-recorded order.
    pub fn keys(&self) -> Result<Vec<String>, RunnerError> {
        let mut keys: Vec<String> = Vec::new();
        for result in self.all()? {
            if !keys.contains(&result.key) {
                keys.push(result.key);
            }
        }
        Ok(keys)
    }

    pub fn runs(&self, key: &str) -> Result<Vec<BenchmarkResult>, RunnerError> {
        Ok(self.all()?.into_iter().filter(|r| r.key == key).collect())
    }
}

/// Past runs of one benchmark, oldest first, for side-by-side reading.
pub fn render_runs(runs: &[BenchmarkResult]) -> String {
    let mut text = String::new();
    for run in runs {
        text.push_str(&format!("Run at {}\n", run.recorded_at.to_rfc3339()));
        let rows = run.result_lines();
        if rows.is_empty() {
            text.push_str(&run.output);
            if !run.output.ends_with('\n') {
                text.push('\n');
            }
        } else {
            for row in rows {
                text.push_str(&format!("  {row}\n"));
            }
        }
        if let Some(profile) = &run.cpu_profile {
            text.push_str(&format!("  cpu profile: {}\n", profile.display()));
        }
    }
    text
}
