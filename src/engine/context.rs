//! Per-file resolution context.
//!
//! Carries the tree being walked, the discovery configuration and the
//! diagnostics collected while resolving. Nothing here outlives one file.
use std::cell::RefCell;
use std::path::Path;

use tracing::trace;

use super::outcome::{Diagnostic, SkipReason};
use super::tree::{NodeId, SyntaxNode, SyntaxTree};

pub const DEFAULT_MAX_REFERENCE_HOPS: usize = 8;

/// Naming conventions and resolution policy for one discovery pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub test_prefix: String,
    /// Entry that orchestrates the test binary rather than testing anything.
    pub reserved_entry: String,
    pub benchmark_prefix: String,
    /// Method that launches a subtest, `t.Run`.
    pub launch_method: String,
    /// Report unexpected node shapes as a hard failure for the file.
    pub strict: bool,
    pub max_reference_hops: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            test_prefix: "Test".to_string(),
            reserved_entry: "TestMain".to_string(),
            benchmark_prefix: "Benchmark".to_string(),
            launch_method: "Run".to_string(),
            strict: false,
            max_reference_hops: DEFAULT_MAX_REFERENCE_HOPS,
        }
    }
}

impl DiscoveryConfig {
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

pub struct Context<'a> {
    tree: &'a SyntaxTree,
    config: &'a DiscoveryConfig,
    file_path: &'a Path,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl<'a> Context<'a> {
    pub fn new(tree: &'a SyntaxTree, config: &'a DiscoveryConfig, file_path: &'a Path) -> Self {
        Self {
            tree,
            config,
            file_path,
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn tree(&self) -> &'a SyntaxTree {
        self.tree
    }

    pub fn config(&self) -> &'a DiscoveryConfig {
        self.config
    }

    pub fn file_path(&self) -> &'a Path {
        self.file_path
    }

    pub fn node(&self, id: NodeId) -> Option<&'a SyntaxNode> {
        self.tree.node(id)
    }

    pub fn line(&self, id: NodeId) -> usize {
        self.tree.line(id)
    }

    /// Record a skipped resolution at the node's line.
    pub fn record(&self, id: NodeId, reason: SkipReason) {
        let line = self.line(id);
        trace!(file = %self.file_path.display(), line, %reason, "resolution skipped");
        self.diagnostics
            .borrow_mut()
            .push(Diagnostic::new(line, reason));
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_go_conventions() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.test_prefix, "Test");
        assert_eq!(config.reserved_entry, "TestMain");
        assert_eq!(config.benchmark_prefix, "Benchmark");
        assert_eq!(config.launch_method, "Run");
        assert!(!config.strict);
    }

    #[test]
    fn test_record_uses_node_line() {
        let mut b = SyntaxTree::builder();
        let id = b.other("binary_expression", 12);
        let tree = b.build();
        let config = DiscoveryConfig::default();
        let ctx = Context::new(&tree, &config, Path::new("a_test.go"));

        ctx.record(id, SkipReason::DynamicName);
        let diagnostics = ctx.into_diagnostics();
        assert_eq!(diagnostics[0].line, 12);
        assert_eq!(diagnostics[0].reason, SkipReason::DynamicName);
    }
}
