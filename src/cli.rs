use anyhow::{Context as AnyhowContext, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

use crate::engine::DiscoveryMode;
use crate::runner::RunOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// What one invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Run every test under the path.
    RunAll,
    /// Discover, then run the one matching `--filter`.
    Select(DiscoveryMode),
    /// Discover and print.
    List(DiscoveryMode),
    Rerun,
    History,
    /// Show stored benchmark results.
    Results,
}

#[derive(Parser, Debug)]
#[command(name = "go-test")]
#[command(about = "Find Go tests, subtests and benchmarks and run them by name", long_about = None)]
pub struct Args {
    /// Directory or test file to search (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Select a specific test or subtest
    #[arg(short = 's', long = "subtest", conflicts_with = "bench")]
    pub subtest: bool,

    /// Select a specific benchmark
    #[arg(short = 'b', long = "bench")]
    pub bench: bool,

    /// Re-run the last recorded command
    #[arg(short = 'r', long, conflicts_with_all = ["history", "subtest", "bench"])]
    pub rerun: bool,

    /// Replay a command from the run history
    #[arg(long = "his", conflicts_with_all = ["subtest", "bench"])]
    pub history: bool,

    /// Show stored results of past benchmark runs
    #[arg(long, conflicts_with_all = ["subtest", "rerun", "history", "debug"])]
    pub results: bool,

    /// Run the selected test under delve
    #[arg(short = 'd', long)]
    pub debug: bool,

    /// Run go test without -v
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Collect coverage and open the HTML report
    #[arg(long)]
    pub cover: bool,

    /// Write a CPU profile and print its top entries
    #[arg(long)]
    pub cpu: bool,

    /// Write a memory profile and print its top entries
    #[arg(long)]
    pub mem: bool,

    /// Report benchmark allocations
    #[arg(long)]
    pub benchmem: bool,

    /// Print discovered tests instead of running them
    #[arg(long)]
    pub list: bool,

    /// Name (or unique part of a name) of the test to pick
    #[arg(long, value_name = "QUERY")]
    pub filter: Option<String>,

    /// Listing format
    #[arg(short = 'f', long, default_value = "text")]
    pub format: OutputFormat,

    /// Fail a file when a subtest name sits in an unrecognized construct
    #[arg(long)]
    pub strict: bool,

    /// Do not color test output
    #[arg(long)]
    pub no_color: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(long)]
    pub silent: bool,
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.path {
            validate_path(path)?;
        }
        if self.debug && self.bench {
            anyhow::bail!("--debug cannot be combined with --bench");
        }
        Ok(())
    }

    pub fn target(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => std::env::current_dir().context("Cannot read current directory"),
        }
    }

    pub fn action(&self) -> Action {
        let mode = if self.bench {
            DiscoveryMode::Benchmarks
        } else {
            DiscoveryMode::Tests
        };

        if self.rerun {
            Action::Rerun
        } else if self.history {
            Action::History
        } else if self.results {
            Action::Results
        } else if self.list && self.filter.is_none() {
            Action::List(mode)
        } else if self.subtest || self.bench || self.filter.is_some() {
            Action::Select(mode)
        } else {
            Action::RunAll
        }
    }

    pub fn run_options(&self, colorize: bool) -> RunOptions {
        RunOptions {
            quiet: self.quiet,
            cover: self.cover,
            cpu_profile: self.cpu,
            mem_profile: self.mem,
            benchmem: self.benchmem,
            colorize: colorize && !self.no_color,
        }
    }
}

pub fn validate_path(path: &Path) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }

    if path.is_file() {
        std::fs::metadata(path).with_context(|| format!("Cannot read file: {}", path.display()))?;
    } else if path.is_dir() {
        std::fs::metadata(path)
            .with_context(|| format!("Cannot read directory: {}", path.display()))?;
    } else {
        anyhow::bail!("Path is neither a file nor a directory: {}", path.display());
    }

    Ok(())
}
