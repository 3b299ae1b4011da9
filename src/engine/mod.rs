pub mod classifier;
pub mod context;
pub mod outcome;
pub mod resolver;
pub mod strategies;
pub mod table;
pub mod test_case;
pub mod tree;

pub use classifier::{classify, Entry};
pub use context::{Context, DiscoveryConfig};
pub use outcome::{Diagnostic, DiagnosticKind, Resolution, SkipReason};
pub use resolver::{Resolver, Subtest};
pub use strategies::Segment;
pub use test_case::{qualify, DiscoveryMode, FileDiscovery, TestCase};
pub use tree::{NodeId, SyntaxNode, SyntaxTree, TreeBuilder};

use std::path::Path;

use tracing::debug;

pub trait Strategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn can_handle(&self, node: &SyntaxNode, ctx: &Context) -> bool;
    fn resolve(&self, id: NodeId, node: &SyntaxNode, ctx: &Context) -> Resolution<Vec<Segment>>;
}

/// Runs classification and subtest resolution over one parsed file.
pub struct Engine {
    resolver: Resolver,
    config: DiscoveryConfig,
}

impl Engine {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            resolver: Resolver::new(),
            config,
        }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Every test case in `tree`: each entry followed by its subtests, in
    /// source order. Benchmarks are listed by name only.
    pub fn discover(&self, tree: &SyntaxTree, file: &Path, mode: DiscoveryMode) -> FileDiscovery {
        let ctx = Context::new(tree, &self.config, file);
        let mut found = FileDiscovery::new(file);
        let is_benchmark = mode == DiscoveryMode::Benchmarks;

        for entry in classify(tree, mode, &self.config) {
            found
                .tests
                .push(TestCase::new(entry.name, file, entry.line, is_benchmark));
            if is_benchmark {
                continue;
            }

            let subtests = self.resolver.resolve_body(entry.body, entry.name, &ctx);
            debug!(entry = entry.name, count = subtests.len(), "resolved subtests");
            found.tests.extend(
                subtests
                    .into_iter()
                    .map(|s| TestCase::new(s.qualified_name, file, s.line, false)),
            );
        }

        found.diagnostics = ctx.into_diagnostics();
        found
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}
