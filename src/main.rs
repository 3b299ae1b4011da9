use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use std::path::Path;
use std::process::ExitCode;
use tracing::{info, warn};

use gotest_picker::benchmarks::{render_runs, BenchmarkResult, BenchmarkStore};
use gotest_picker::cli::{Action, Args, OutputFormat};
use gotest_picker::config::Config;
use gotest_picker::discovery::Discoverer;
use gotest_picker::engine::{DiscoveryMode, TestCase};
use gotest_picker::error::RunnerError;
use gotest_picker::history::{History, HistoryEntry};
use gotest_picker::logging::{self, Verbosity};
use gotest_picker::output::OutputFormatter;
use gotest_picker::runner::{self, RunOutcome, Runner};
use gotest_picker::select::{choose, search, Selectable, Selection};

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.silent));
    args.validate().context("Invalid arguments")?;

    let target = args.target()?;
    let mut config = Config::load(&runner::test_directory(&target))
        .context("Failed to load configuration")?;
    if args.strict {
        config.strict = true;
    }
    let runner = Runner::new(args.run_options(config.colorize_output));

    let passed = match args.action() {
        Action::RunAll => {
            let outcome = runner.run_tests(&target, None)?;
            record(&outcome);
            outcome.passed
        }
        Action::List(mode) => {
            let tests = discover(&target, mode, &config)?;
            print!("{}", OutputFormatter::format(&tests, &target, args.format)?);
            true
        }
        Action::Select(mode) => select_and_run(&args, &target, mode, &config, &runner)?,
        Action::Rerun => {
            let history = History::open_default()?;
            let last = history.last()?.ok_or(RunnerError::EmptyHistory)?;
            runner.replay(&last.command())?
        }
        Action::History => replay_from_history(&args, &runner)?,
        Action::Results => show_benchmark_results(&args)?,
    };

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn discover(target: &Path, mode: DiscoveryMode, config: &Config) -> Result<Vec<TestCase>> {
    let mut discoverer = Discoverer::new(config.discovery_config())?;
    let tests = discoverer
        .discover_dir(target, mode, &config.walk_options())
        .with_context(|| format!("Failed to discover tests in {}", target.display()))?;
    info!(count = tests.len(), "discovered");
    Ok(tests)
}

fn select_and_run(
    args: &Args,
    target: &Path,
    mode: DiscoveryMode,
    config: &Config,
    runner: &Runner,
) -> Result<bool> {
    let tests = discover(target, mode, config)?;
    let noun = match mode {
        DiscoveryMode::Tests => "tests",
        DiscoveryMode::Benchmarks => "benchmarks",
    };
    if tests.is_empty() {
        println!("No {noun} found in {}", target.display());
        return Ok(true);
    }

    let Some(query) = args.filter.as_deref() else {
        print_candidates(&tests.iter().collect::<Vec<_>>(), target, args.format)?;
        eprintln!("Pass --filter to pick one of the {} {noun}", tests.len());
        return Ok(true);
    };

    if args.list {
        print_candidates(&search(&tests, query), target, args.format)?;
        return Ok(true);
    }

    match choose(&tests, query) {
        Selection::Chosen(test) => {
            let outcome = if args.debug {
                runner.debug(test)?
            } else if mode == DiscoveryMode::Benchmarks {
                let outcome = runner.run_benchmark(target, Some(test))?;
                record_benchmark(test, &outcome);
                outcome
            } else {
                runner.run_tests(target, Some(test))?
            };
            if !args.debug {
                record(&outcome);
            }
            Ok(outcome.passed)
        }
        Selection::Candidates(candidates) if candidates.is_empty() => {
            eprintln!("No {noun} match '{query}'");
            Ok(false)
        }
        Selection::Candidates(candidates) => {
            print_candidates(&candidates, target, args.format)?;
            eprintln!("'{query}' matches {} {noun}; narrow --filter", candidates.len());
            Ok(false)
        }
    }
}

fn replay_from_history(args: &Args, runner: &Runner) -> Result<bool> {
    let entries = History::open_default()?.newest_first()?;
    if entries.is_empty() {
        println!("No history recorded yet");
        return Ok(true);
    }

    let Some(query) = args.filter.as_deref() else {
        for (index, entry) in entries.iter().enumerate() {
            println!("{:>3}  {}  @ {}", index + 1, entry.display_name(), entry.dir.display());
        }
        return Ok(true);
    };

    match choose(&entries, query) {
        Selection::Chosen(entry) => Ok(runner.replay(&entry.command())?),
        Selection::Candidates(candidates) => {
            for entry in &candidates {
                println!("{}", entry.display_name());
            }
            eprintln!("'{query}' matches {} history entries", candidates.len());
            Ok(false)
        }
    }
}

fn show_benchmark_results(args: &Args) -> Result<bool> {
    let store = BenchmarkStore::open_default()?;
    let keys = store.keys()?;
    if keys.is_empty() {
        println!("No benchmark results recorded yet");
        return Ok(true);
    }

    let Some(query) = args.filter.as_deref() else {
        for key in &keys {
            println!("{key}");
        }
        return Ok(true);
    };

    match choose(&keys, query) {
        Selection::Chosen(key) => {
            print!("{}", render_runs(&store.runs(key)?));
            Ok(true)
        }
        Selection::Candidates(candidates) => {
            for key in &candidates {
                println!("{key}");
            }
            eprintln!("'{query}' matches {} benchmarks", candidates.len());
            Ok(false)
        }
    }
}

fn print_candidates(candidates: &[&TestCase], root: &Path, format: OutputFormat) -> Result<()> {
    let owned: Vec<TestCase> = candidates.iter().map(|t| (*t).clone()).collect();
    print!("{}", OutputFormatter::format(&owned, root, format)?);
    Ok(())
}

fn record_benchmark(bench: &TestCase, outcome: &RunOutcome) {
    let Some(result) = BenchmarkResult::from_outcome(Some(bench), outcome) else {
        return;
    };
    let stored = BenchmarkStore::open_default().and_then(|s| s.append(&result));
    if let Err(e) = stored {
        warn!(error = %e, "could not store benchmark result");
    }
}

fn record(outcome: &RunOutcome) {
    let recorded = History::open_default().and_then(|h| h.append(&HistoryEntry::from(outcome)));
    if let Err(e) = recorded {
        warn!(error = %e, "could not record run history");
    }
}
