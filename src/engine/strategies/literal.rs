use crate::engine::table::literal_segment;
use crate::engine::tree::{NodeId, SyntaxNode};
use crate::engine::{Context, Resolution, Strategy};

use super::Segment;

pub struct LiteralStrategy;

impl Default for LiteralStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for LiteralStrategy {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn can_handle(&self, node: &SyntaxNode, _ctx: &Context) -> bool {
        matches!(node, SyntaxNode::Literal { .. })
    }

    fn resolve(&self, id: NodeId, node: &SyntaxNode, ctx: &Context) -> Resolution<Vec<Segment>> {
        match node {
            SyntaxNode::Literal { text } => literal_segment(text, ctx.line(id)).map(|s| vec![s]),
            _ => Resolution::Resolved(Vec::new()),
        }
    }
}
