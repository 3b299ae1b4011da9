use crate::engine::table;
use crate::engine::tree::{NodeId, SyntaxNode};
use crate::engine::{Context, Resolution, Strategy};

use super::Segment;

/// Resolves `row.field` by looking the field up in every row of the table
/// `row` ranges over.
pub struct FieldStrategy;

impl Default for FieldStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for FieldStrategy {
    fn name(&self) -> &'static str {
        "field"
    }

    fn can_handle(&self, node: &SyntaxNode, _ctx: &Context) -> bool {
        matches!(node, SyntaxNode::MemberAccess { .. })
    }

    fn resolve(&self, _id: NodeId, node: &SyntaxNode, ctx: &Context) -> Resolution<Vec<Segment>> {
        match node {
            SyntaxNode::MemberAccess { target, member } => table::lookup(member, *target, ctx),
            _ => Resolution::Resolved(Vec::new()),
        }
    }
}
