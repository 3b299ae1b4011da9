//! Builds and runs `go test`, benchmark, coverage, profile and delve
//! commands for discovered tests.

pub mod command;
pub mod debug;
pub mod module;
pub mod output;

pub use command::{run_filter, TestCommand};
pub use module::{find_module_root, package_path, test_directory};

use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use termcolor::{ColorChoice, StandardStream};
use tracing::{info, warn};

use crate::engine::TestCase;
use crate::error::RunnerError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Drop `-v` from `go test`.
    pub quiet: bool,
    pub cover: bool,
    pub cpu_profile: bool,
    pub mem_profile: bool,
    pub benchmem: bool,
    pub colorize: bool,
}

/// The command that ran and whether it succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub command: TestCommand,
    pub passed: bool,
    /// Standard output, kept for benchmark runs.
    pub output: Option<String>,
    pub cpu_profile: Option<PathBuf>,
}

pub struct Runner {
    options: RunOptions,
}

impl Runner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Command for `test`, or for every package under `path` when `test` is
    /// `None`.
    pub fn test_command(
        &self,
        path: &Path,
        test: Option<&TestCase>,
    ) -> Result<(TestCommand, Profiles), RunnerError> {
        let (package, module_root) = locate(path, test)?;
        let filter = test.map(|t| run_filter(&t.qualified_name));
        let mut command = TestCommand::go_test(
            &package,
            filter.as_deref(),
            self.options.quiet,
            &module_root,
        );

        let profiles = Profiles::create(&self.options)?;
        if let Some(cover) = &profiles.cover {
            command = command.with_profile("-coverprofile", cover);
        }
        command = profiles.apply(command);
        Ok((command, profiles))
    }

    pub fn bench_command(
        &self,
        path: &Path,
        bench: Option<&TestCase>,
    ) -> Result<(TestCommand, Profiles), RunnerError> {
        let (package, module_root) = locate(path, bench)?;
        let filter = bench.map(|b| run_filter(&b.qualified_name));
        let command = TestCommand::go_bench(
            &package,
            filter.as_deref(),
            self.options.benchmem,
            &module_root,
        );

        // Coverage is not collected for benchmark runs.
        let options = RunOptions {
            cover: false,
            ..self.options
        };
        let profiles = Profiles::create(&options)?;
        let command = profiles.apply(command);
        Ok((command, profiles))
    }

    pub fn run_tests(&self, path: &Path, test: Option<&TestCase>) -> Result<RunOutcome, RunnerError> {
        let (command, profiles) = self.test_command(path, test)?;
        let passed = self.execute(&command)?;
        profiles.report(&command.dir);
        Ok(RunOutcome {
            command,
            passed,
            output: None,
            cpu_profile: profiles.cpu,
        })
    }

    /// Runs benchmarks, echoing and keeping their output so the results can
    /// be stored.
    pub fn run_benchmark(
        &self,
        path: &Path,
        bench: Option<&TestCase>,
    ) -> Result<RunOutcome, RunnerError> {
        let (command, profiles) = self.bench_command(path, bench)?;
        let (passed, output) = self.execute_captured(&command)?;
        profiles.report(&command.dir);
        Ok(RunOutcome {
            command,
            passed,
            output: Some(output),
            cpu_profile: profiles.cpu,
        })
    }

    /// Runs `test` under delve, stopped at its declaration.
    pub fn debug(&self, test: &TestCase) -> Result<RunOutcome, RunnerError> {
        let (package, module_root) = locate(&test.source_file, Some(test))?;

        let lookup = TestCommand::go_list_import_path(&package, &module_root);
        let listed = lookup
            .to_command()
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| RunnerError::spawn_failed(&lookup.program, e))?;
        if !listed.status.success() {
            return Err(RunnerError::tool_failed(
                lookup.to_string(),
                listed.status.to_string(),
                String::from_utf8_lossy(&listed.stderr).trim(),
            ));
        }
        let import_path = String::from_utf8_lossy(&listed.stdout).trim().to_string();

        let file = module::relative_to(&test.source_file, &module_root);
        let script = debug::write_init_script(&debug::breakpoint_script(&file, test.source_line))?;
        let command = TestCommand::dlv_test(
            script.path(),
            &import_path,
            &run_filter(&test.qualified_name),
            &module_root,
        );

        info!(%command, "starting debugger");
        let status = command
            .to_command()
            .status()
            .map_err(|e| RunnerError::spawn_failed(&command.program, e))?;
        Ok(RunOutcome {
            passed: status.success(),
            command,
            output: None,
            cpu_profile: None,
        })
    }

    /// Runs a stored command as-is.
    pub fn replay(&self, command: &TestCommand) -> Result<bool, RunnerError> {
        self.execute(command)
    }

    /// Runs `command` with inherited stdin and stderr. A non-zero exit is a
    /// failed run, not an error.
    pub fn execute(&self, command: &TestCommand) -> Result<bool, RunnerError> {
        println!("Running {} @ {}", command, command.dir.display());

        let status = if self.options.colorize {
            self.execute_piped(command, ColorChoice::Auto)?.0
        } else {
            command
                .to_command()
                .status()
                .map_err(|e| RunnerError::spawn_failed(&command.program, e))?
        };

        if !status.success() {
            info!(%command, %status, "run failed");
        }
        Ok(status.success())
    }

    /// Like [`Runner::execute`], but also returns what the command printed.
    pub fn execute_captured(&self, command: &TestCommand) -> Result<(bool, String), RunnerError> {
        println!("Running {} @ {}", command, command.dir.display());

        let choice = if self.options.colorize {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let (status, output) = self.execute_piped(command, choice)?;

        if !status.success() {
            info!(%command, %status, "run failed");
        }
        Ok((status.success(), output))
    }

    fn execute_piped(
        &self,
        command: &TestCommand,
        choice: ColorChoice,
    ) -> Result<(ExitStatus, String), RunnerError> {
        let mut child = command
            .to_command()
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|e| RunnerError::spawn_failed(&command.program, e))?;

        let mut output = String::new();
        if let Some(stdout) = child.stdout.take() {
            let mut reader = BufReader::new(stdout);
            let mut out = StandardStream::stdout(choice);
            match output::stream_colored(&mut reader, &mut out) {
                Ok(text) => output = text,
                Err(e) => {
                    warn!(error = %e, "failed to forward test output");
                    // Keep the pipe drained so the child is not cut off.
                    let _ = io::copy(&mut reader, &mut io::sink());
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| RunnerError::spawn_failed(&command.program, e))?;
        Ok((status, output))
    }
}

/// Profile files requested for one run. They outlive the run so they can
/// be inspected afterwards.
#[derive(Debug, Default)]
pub struct Profiles {
    pub cover: Option<PathBuf>,
    pub cpu: Option<PathBuf>,
    pub mem: Option<PathBuf>,
}

impl Profiles {
    fn create(options: &RunOptions) -> Result<Self, RunnerError> {
        let make = |wanted: bool| wanted.then(persistent_temp_file).transpose();
        Ok(Self {
            cover: make(options.cover)?,
            cpu: make(options.cpu_profile)?,
            mem: make(options.mem_profile)?,
        })
    }

    fn apply(&self, mut command: TestCommand) -> TestCommand {
        if let Some(cpu) = &self.cpu {
            command = command.with_profile("-cpuprofile", cpu);
        }
        if let Some(mem) = &self.mem {
            command = command.with_profile("-memprofile", mem);
        }
        command
    }

    /// Opens the coverage viewer and prints the top of each profile.
    /// Failures here only warn; the run itself already finished.
    fn report(&self, dir: &Path) {
        if let Some(cover) = &self.cover {
            run_tool(&TestCommand::cover_html(cover, dir));
        }
        if let Some(cpu) = &self.cpu {
            println!("Wrote CPU profile to: {}", cpu.display());
            run_tool(&TestCommand::pprof_top(cpu, dir));
        }
        if let Some(mem) = &self.mem {
            println!("Wrote memory profile to: {}", mem.display());
            run_tool(&TestCommand::pprof_top(mem, dir));
        }
    }
}

fn run_tool(command: &TestCommand) {
    match command.to_command().status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!(%command, %status, "tool exited unsuccessfully"),
        Err(e) => warn!(%command, error = %e, "failed to launch tool"),
    }
}

fn persistent_temp_file() -> Result<PathBuf, RunnerError> {
    tempfile::Builder::new()
        .prefix("go-test_")
        .tempfile()
        .map_err(RunnerError::temp_file)?
        .into_temp_path()
        .keep()
        .map_err(|e| RunnerError::temp_file(e.error))
}

/// Package path and module root for a run of `test`, or of everything under
/// `path`.
fn locate(path: &Path, test: Option<&TestCase>) -> Result<(String, PathBuf), RunnerError> {
    let anchor = test.map(|t| t.source_file.as_path()).unwrap_or(path);
    let dir = absolute(&test_directory(anchor));
    let module_root = find_module_root(&dir)?;
    let package = package_path(&dir, &module_root, test.is_none());
    Ok((package, module_root))
}

fn absolute(path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() {
        return std::env::current_dir().unwrap_or_default();
    }
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
