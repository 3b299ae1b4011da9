use tracing::{debug, trace};

use super::outcome::{Resolution, SkipReason};
use super::strategies::{FieldStrategy, IdentifierStrategy, LiteralStrategy, Segment};
use super::test_case::qualify;
use super::tree::{NodeId, SyntaxNode};
use super::{Context, Strategy};

/// A subtest found under an entry, fully qualified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtest {
    pub qualified_name: String,
    pub line: usize,
}

/// Walks an entry body for subtest launches and names them.
pub struct Resolver {
    strategies: Vec<Box<dyn Strategy>>,
}

impl Resolver {
    pub fn new() -> Self {
        Self {
            strategies: Self::default_strategies(),
        }
    }

    /// Returns the default strategy chain, simplest first.
    fn default_strategies() -> Vec<Box<dyn Strategy>> {
        vec![
            Box::new(LiteralStrategy::new()),
            Box::new(FieldStrategy::new()),
            Box::new(IdentifierStrategy::new()),
        ]
    }

    /// Qualified subtests reachable from `body`, depth first, in source and
    /// table order. A statement that cannot be resolved is recorded and
    /// skipped; its siblings are still visited.
    pub fn resolve_body(&self, body: &[NodeId], enclosing: &str, ctx: &Context) -> Vec<Subtest> {
        let mut found = Vec::new();
        for &statement in body {
            match self.resolve_statement(statement, enclosing, ctx) {
                Resolution::Resolved(mut subtests) => found.append(&mut subtests),
                Resolution::Skipped(reason) => {
                    debug!(enclosing, line = ctx.line(statement), %reason, "skipping statement");
                    ctx.record(statement, reason);
                }
            }
        }
        found
    }

    fn resolve_statement(
        &self,
        statement: NodeId,
        enclosing: &str,
        ctx: &Context,
    ) -> Resolution<Vec<Subtest>> {
        match ctx.node(statement) {
            None => Resolution::Skipped(SkipReason::DanglingNode),
            // Loops repeat launches but add no path segment of their own.
            Some(SyntaxNode::Iteration { body, .. }) => {
                Resolution::Resolved(self.resolve_body(body, enclosing, ctx))
            }
            Some(SyntaxNode::Invocation { callee, arguments }) => {
                if self.is_launch(*callee, ctx) {
                    self.resolve_launch(arguments, enclosing, ctx)
                } else {
                    Resolution::Resolved(Vec::new())
                }
            }
            Some(_) => Resolution::Resolved(Vec::new()),
        }
    }

    fn is_launch(&self, callee: NodeId, ctx: &Context) -> bool {
        matches!(
            ctx.node(callee),
            Some(SyntaxNode::MemberAccess { member, .. }) if *member == ctx.config().launch_method
        )
    }

    /// `t.Run(name, func(t *testing.T) { ... })`: one subtest per resolved
    /// name, each followed by whatever the closure launches beneath it.
    fn resolve_launch(
        &self,
        arguments: &[NodeId],
        enclosing: &str,
        ctx: &Context,
    ) -> Resolution<Vec<Subtest>> {
        let Some(&name_arg) = arguments.first() else {
            return Resolution::Skipped(SkipReason::MissingArgument);
        };

        let segments = match self.resolve_name(name_arg, ctx) {
            Resolution::Resolved(segments) => segments,
            Resolution::Skipped(reason) => return Resolution::Skipped(reason),
        };

        let closure_body = arguments.get(1).and_then(|&arg| match ctx.node(arg) {
            Some(SyntaxNode::Closure { body }) => Some(body.as_slice()),
            _ => None,
        });

        let mut found = Vec::new();
        for segment in segments {
            let qualified_name = qualify(enclosing, &segment.name);
            let nested = closure_body
                .map(|body| self.resolve_body(body, &qualified_name, ctx))
                .unwrap_or_default();
            found.push(Subtest {
                qualified_name,
                line: segment.line,
            });
            found.extend(nested);
        }
        Resolution::Resolved(found)
    }

    pub fn resolve_name(&self, id: NodeId, ctx: &Context) -> Resolution<Vec<Segment>> {
        let Some(node) = ctx.node(id) else {
            return Resolution::Skipped(SkipReason::DanglingNode);
        };

        for strategy in &self.strategies {
            if strategy.can_handle(node, ctx) {
                trace!(strategy = strategy.name(), line = ctx.line(id), "resolving name");
                return strategy.resolve(id, node, ctx);
            }
        }

        // Call results, closures, expressions: only known at run time.
        Resolution::Skipped(SkipReason::DynamicName)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}
