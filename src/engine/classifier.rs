use tracing::trace;

use super::context::DiscoveryConfig;
use super::test_case::DiscoveryMode;
use super::tree::{NodeId, SyntaxNode, SyntaxTree};

/// A top-level declaration recognized as a test or benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<'t> {
    pub id: NodeId,
    pub name: &'t str,
    pub body: &'t [NodeId],
    pub line: usize,
}

pub fn is_entry_name(name: &str, mode: DiscoveryMode, config: &DiscoveryConfig) -> bool {
    match mode {
        DiscoveryMode::Tests => {
            name.starts_with(&config.test_prefix) && name != config.reserved_entry
        }
        DiscoveryMode::Benchmarks => name.starts_with(&config.benchmark_prefix),
    }
}

/// Top-level declarations matching the naming convention for `mode`, in
/// declaration order.
pub fn classify<'t>(
    tree: &'t SyntaxTree,
    mode: DiscoveryMode,
    config: &DiscoveryConfig,
) -> Vec<Entry<'t>> {
    tree.declarations()
        .iter()
        .filter_map(|&id| match tree.node(id) {
            Some(SyntaxNode::Declaration { name, body }) => {
                trace!(name = name.as_str(), "evaluating declaration");
                is_entry_name(name, mode, config).then(|| Entry {
                    id,
                    name: name.as_str(),
                    body: body.as_slice(),
                    line: tree.line(id),
                })
            }
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> SyntaxTree {
        let mut b = SyntaxTree::builder();
        b.declaration("helper", vec![], 1);
        b.declaration("TestMain", vec![], 3);
        b.declaration("TestAdd", vec![], 5);
        b.declaration("BenchmarkAdd", vec![], 9);
        b.declaration("Test_sub", vec![], 12);
        b.build()
    }

    #[test]
    fn test_classify_tests_skips_reserved_entry() {
        let tree = sample_tree();
        let entries = classify(&tree, DiscoveryMode::Tests, &DiscoveryConfig::default());
        let names: Vec<_> = entries.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["TestAdd", "Test_sub"]);
        assert_eq!(entries[0].line, 5);
    }

    #[test]
    fn test_classify_benchmarks() {
        let tree = sample_tree();
        let entries = classify(&tree, DiscoveryMode::Benchmarks, &DiscoveryConfig::default());
        let names: Vec<_> = entries.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["BenchmarkAdd"]);
    }

    #[test]
    fn test_custom_prefix() {
        let config = DiscoveryConfig {
            test_prefix: "Check".to_string(),
            ..DiscoveryConfig::default()
        };
        assert!(is_entry_name("CheckThing", DiscoveryMode::Tests, &config));
        assert!(!is_entry_name("TestThing", DiscoveryMode::Tests, &config));
    }

    #[test]
    fn test_non_declaration_roots_are_ignored() {
        let mut b = SyntaxTree::builder();
        let stray = b.other("var_declaration", 1);
        b.add_declaration(stray);
        b.declaration("TestOnly", vec![], 2);
        let tree = b.build();

        let entries = classify(&tree, DiscoveryMode::Tests, &DiscoveryConfig::default());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "TestOnly");
    }
}
