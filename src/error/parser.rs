use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("failed to set parser language: {language}")]
    LanguageSetupFailed { language: String },

    #[error("failed to parse source code in {path}")]
    ParseFailed { path: PathBuf },

    #[error("{path} is not valid UTF-8")]
    InvalidEncoding { path: PathBuf },
}

impl ParserError {
    pub fn language_setup_failed(language: impl Into<String>) -> Self {
        Self::LanguageSetupFailed {
            language: language.into(),
        }
    }

    pub fn parse_failed(path: impl Into<PathBuf>) -> Self {
        Self::ParseFailed { path: path.into() }
    }

    pub fn invalid_encoding(path: impl Into<PathBuf>) -> Self {
        Self::InvalidEncoding { path: path.into() }
    }
}
