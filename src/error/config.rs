use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid value for {variable}: '{value}' (expected true or false)")]
    InvalidEnvValue { variable: String, value: String },
}

impl ConfigError {
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_env_value(variable: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidEnvValue {
            variable: variable.into(),
            value: value.into(),
        }
    }
}
