//! Shared helpers for resolution tests

use gotest_picker::engine::{DiscoveryConfig, DiscoveryMode, Engine, FileDiscovery};
use gotest_picker::parser::GoParser;
use std::path::Path;

pub const FILE: &str = "inline_test.go";

/// Parse Go source and run test discovery on it
pub fn discover_go(source: &str) -> FileDiscovery {
    discover_go_with(source, DiscoveryMode::Tests, DiscoveryConfig::default())
}

pub fn discover_go_with(source: &str, mode: DiscoveryMode, config: DiscoveryConfig) -> FileDiscovery {
    let tree = GoParser::new()
        .unwrap()
        .parse(source, Path::new(FILE))
        .unwrap();
    Engine::new(config).discover(&tree, Path::new(FILE), mode)
}

/// Qualified names in discovery order
pub fn names(found: &FileDiscovery) -> Vec<String> {
    found.tests.iter().map(|t| t.qualified_name.clone()).collect()
}

/// Source line of the test case with the given name
pub fn line_of(found: &FileDiscovery, name: &str) -> Option<usize> {
    found
        .tests
        .iter()
        .find(|t| t.qualified_name == name)
        .map(|t| t.source_line)
}
