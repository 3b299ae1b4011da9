use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("no go.mod found in {path} or any parent directory")]
    MissingModule { path: PathBuf },

    #[error("failed to launch '{program}': {source}")]
    SpawnFailed {
        program: String,
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status}: {stderr}")]
    ToolFailed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("failed to create temporary file: {source}")]
    TempFile { source: std::io::Error },

    #[error("history file '{path}': {message}")]
    History { path: PathBuf, message: String },

    #[error("benchmark results '{path}': {message}")]
    BenchmarkStore { path: PathBuf, message: String },

    #[error("no previous run recorded")]
    EmptyHistory,

    #[error("cannot determine home directory")]
    NoHomeDirectory,
}

impl RunnerError {
    pub fn missing_module(path: impl Into<PathBuf>) -> Self {
        Self::MissingModule { path: path.into() }
    }

    pub fn spawn_failed(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::SpawnFailed {
            program: program.into(),
            source,
        }
    }

    pub fn tool_failed(
        program: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::ToolFailed {
            program: program.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    pub fn temp_file(source: std::io::Error) -> Self {
        Self::TempFile { source }
    }

    pub fn history(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::History {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn benchmark_store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::BenchmarkStore {
            path: path.into(),
            message: message.into(),
        }
    }
}
