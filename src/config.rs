use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::discovery::{WalkOptions, DEFAULT_EXCLUDED_DIRS};
use crate::engine::DiscoveryConfig;
use crate::error::ConfigError;

pub const PROJECT_CONFIG_FILE: &str = ".go-test.yaml";
pub const COLOR_ENV: &str = "GO_TEST_COLOR";
pub const STRICT_ENV: &str = "GO_TEST_STRICT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color PASS/FAIL lines in test output.
    pub colorize_output: bool,
    /// Fail a file when an unrecognized construct sits where a subtest name
    /// was expected.
    pub strict: bool,
    pub exclude_dirs: Vec<String>,
    pub include_hidden: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colorize_output: true,
            strict: false,
            exclude_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            include_hidden: false,
        }
    }
}

impl Config {
    /// Loads `.go-test.yaml` from `project_dir`, else the user config, else
    /// defaults; then applies environment overrides.
    pub fn load(project_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = match Self::locate(project_dir) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    fn locate(project_dir: &Path) -> Option<PathBuf> {
        let local = project_dir.join(PROJECT_CONFIG_FILE);
        if local.is_file() {
            return Some(local);
        }
        Self::user_config_path().filter(|p| p.is_file())
    }

    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("go-test").join("config.yaml"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::read_error(path, e.to_string()))?;
        let config = Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::parse_error(path, message),
            other => other,
        })?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty file deserializes to null, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse_error("<inline>", e.to_string()))
    }

    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(COLOR_ENV) {
            self.colorize_output = parse_bool(COLOR_ENV, &value)?;
        }
        if let Some(value) = lookup(STRICT_ENV) {
            self.strict = parse_bool(STRICT_ENV, &value)?;
        }
        Ok(())
    }

    pub fn discovery_config(&self) -> DiscoveryConfig {
        DiscoveryConfig::default().strict(self.strict)
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            exclude_dirs: self.exclude_dirs.clone(),
            include_hidden: self.include_hidden,
        }
    }
}

fn parse_bool(variable: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid_env_value(variable, value)),
    }
}
