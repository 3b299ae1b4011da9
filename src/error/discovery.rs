use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("{path}:{line}: unexpected {found} where a {expected} was expected")]
    StrictViolation {
        path: PathBuf,
        line: usize,
        expected: String,
        found: String,
    },
}

impl DiscoveryError {
    pub fn strict_violation(
        path: impl Into<PathBuf>,
        line: usize,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::StrictViolation {
            path: path.into(),
            line,
            expected: expected.into(),
            found: found.into(),
        }
    }
}
