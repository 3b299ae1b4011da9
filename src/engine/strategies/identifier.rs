use crate::engine::table::{dereference, literal_segment};
use crate::engine::tree::{NodeId, SyntaxNode};
use crate::engine::{Context, Resolution, SkipReason, Strategy};

use super::Segment;

/// Resolves an identifier bound to a literal. Anything else it may be bound
/// to is only known at run time.
pub struct IdentifierStrategy;

impl Default for IdentifierStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for IdentifierStrategy {
    fn name(&self) -> &'static str {
        "identifier"
    }

    fn can_handle(&self, node: &SyntaxNode, _ctx: &Context) -> bool {
        matches!(node, SyntaxNode::Identifier { .. })
    }

    fn resolve(&self, id: NodeId, _node: &SyntaxNode, ctx: &Context) -> Resolution<Vec<Segment>> {
        dereference(id, ctx).and_then(|target| match ctx.node(target) {
            Some(SyntaxNode::Literal { text }) => {
                literal_segment(text, ctx.line(id)).map(|s| vec![s])
            }
            _ => Resolution::Skipped(SkipReason::UnresolvedIdentifier),
        })
    }
}
