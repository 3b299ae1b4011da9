use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

/// Log verbosity, least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    Debug,
    Trace,
}

impl Verbosity {
    pub fn from_flags(verbose: u8, silent: bool) -> Self {
        if silent {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }

    fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Directives for the library and the binary; other crates stay quiet.
    fn to_filter(self) -> String {
        let level = self.to_level().as_str().to_lowercase();
        format!("gotest_picker={level},go_test={level}")
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the flags.
///
/// Logs go to stderr; stdout carries test output and listings.
pub fn init(verbosity: Verbosity) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.to_filter()));

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_file(verbosity >= Verbosity::Debug)
        .with_line_number(verbosity >= Verbosity::Debug)
        .compact();

    if verbosity <= Verbosity::Normal {
        subscriber.without_time().init();
    } else {
        subscriber.init();
    }
}
