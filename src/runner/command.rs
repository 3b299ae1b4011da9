use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::engine::test_case::PATH_DELIMITER;

/// `-run` pattern that matches a never-declared name, so only benchmarks run.
pub const NO_TESTS_PATTERN: &str = "XXX";

/// A program invocation, ready to run or to store in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCommand {
    pub program: String,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

impl TestCommand {
    pub fn new(program: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            dir: dir.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// `go test [-v] <package> [-run <filter>]`.
    pub fn go_test(package: &str, filter: Option<&str>, quiet: bool, dir: &Path) -> Self {
        let mut command = Self::new("go", dir).arg("test");
        if !quiet {
            command = command.arg("-v");
        }
        command = command.arg(package);
        if let Some(filter) = filter {
            command = command.args(["-run", filter]);
        }
        command
    }

    /// `go test -v -run XXX -bench <filter|.> [-benchmem] <package>`.
    pub fn go_bench(package: &str, filter: Option<&str>, benchmem: bool, dir: &Path) -> Self {
        let mut command = Self::new("go", dir)
            .args(["test", "-v", "-run", NO_TESTS_PATTERN, "-bench"])
            .arg(filter.unwrap_or("."));
        if benchmem {
            command = command.arg("-benchmem");
        }
        command.arg(package)
    }

    pub fn with_profile(self, flag: &str, file: &Path) -> Self {
        self.arg(flag).arg(file.to_string_lossy())
    }

    pub fn cover_html(profile: &Path, dir: &Path) -> Self {
        Self::new("go", dir).args(["tool", "cover"]).arg(format!("-html={}", profile.display()))
    }

    pub fn pprof_top(profile: &Path, dir: &Path) -> Self {
        Self::new("go", dir)
            .args(["tool", "pprof", "-top"])
            .arg(profile.to_string_lossy())
    }

    pub fn go_list_import_path(package: &str, dir: &Path) -> Self {
        Self::new("go", dir).args(["list", "-f", "{{.ImportPath}}", package])
    }

    pub fn dlv_test(init_script: &Path, import_path: &str, filter: &str, dir: &Path) -> Self {
        Self::new("dlv", dir)
            .args(["test", "--init"])
            .arg(init_script.to_string_lossy())
            .args([import_path, "--", "-test.run", filter])
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(&self.dir);
        command
    }
}

impl fmt::Display for TestCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// `-run` expression selecting exactly one test or subtest.
///
/// `go test` matches each `/`-separated level separately and rewrites spaces
/// in subtest names to underscores.
pub fn run_filter(qualified_name: &str) -> String {
    qualified_name
        .split(PATH_DELIMITER)
        .map(|segment| {
            let rewritten: String = segment
                .chars()
                .map(|c| if c.is_whitespace() { '_' } else { c })
                .collect();
            format!("^{}$", regex::escape(&rewritten))
        })
        .collect::<Vec<_>>()
        .join("/")
}
