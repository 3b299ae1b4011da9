mod config;
mod discovery;
mod io;
mod parser;
mod runner;

pub use config::ConfigError;
pub use discovery::DiscoveryError;
pub use io::IoError;
pub use parser::ParserError;
pub use runner::RunnerError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] IoError),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_are_transparent() {
        let err: Error = IoError::file_not_found("a_test.go").into();
        assert_eq!(err.to_string(), "file not found: a_test.go");

        let err: Error = RunnerError::missing_module("/tmp/x").into();
        assert!(matches!(err, Error::Runner(_)));
    }
}
