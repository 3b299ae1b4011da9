//! Arena-backed syntax tree consumed by the discovery engine.
//!
//! Nodes refer to each other by [`NodeId`]. Identifiers carry a resolved
//! back-reference to the value they were bound to, filled in once when the
//! tree is built, so the resolver never has to search for declarations.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// Function or method declaration.
    Declaration { name: String, body: Vec<NodeId> },
    Invocation {
        callee: NodeId,
        arguments: Vec<NodeId>,
    },
    /// Selector or field access: `target.member`.
    MemberAccess { target: NodeId, member: String },
    /// Struct, array, slice or map literal. Elements are keyed or positional element nodes.
    CompositeValue { elements: Vec<NodeId> },
    KeyedElement { key: String, value: NodeId },
    PositionalElement { value: NodeId },
    /// Raw literal text, quotes included.
    Literal { text: String },
    /// for/range loop. `source` is the ranged-over expression, absent for clause loops.
    Iteration {
        source: Option<NodeId>,
        body: Vec<NodeId>,
    },
    Closure { body: Vec<NodeId> },
    Identifier {
        name: String,
        declaration: Option<NodeId>,
    },
    /// One level of address-of or dereference.
    Indirection { target: NodeId },
    /// Anything the engine has no pattern for.
    Other { kind: String },
}

impl SyntaxNode {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Declaration { .. } => "declaration",
            Self::Invocation { .. } => "invocation",
            Self::MemberAccess { .. } => "member_access",
            Self::CompositeValue { .. } => "composite_value",
            Self::KeyedElement { .. } => "keyed_element",
            Self::PositionalElement { .. } => "positional_element",
            Self::Literal { .. } => "literal",
            Self::Iteration { .. } => "iteration",
            Self::Closure { .. } => "closure",
            Self::Identifier { .. } => "identifier",
            Self::Indirection { .. } => "indirection",
            Self::Other { .. } => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: SyntaxNode,
    /// 1-based source line, 0 when unknown.
    pub line: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    nodes: Vec<Node>,
    declarations: Vec<NodeId>,
}

impl SyntaxTree {
    pub fn builder() -> TreeBuilder {
        TreeBuilder::default()
    }

    /// Returns `None` for ids that do not belong to this tree.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node(&self, id: NodeId) -> Option<&SyntaxNode> {
        self.get(id).map(|n| &n.kind)
    }

    pub fn line(&self, id: NodeId) -> usize {
        self.get(id).map(|n| n.line).unwrap_or(0)
    }

    /// Top-level declarations in source order.
    pub fn declarations(&self) -> &[NodeId] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Incremental constructor for [`SyntaxTree`].
///
/// Children must be pushed before the parent that refers to them.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<Node>,
    declarations: Vec<NodeId>,
}

impl TreeBuilder {
    pub fn push(&mut self, kind: SyntaxNode, line: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, line });
        id
    }

    /// Registers an already pushed node as a top-level declaration.
    pub fn add_declaration(&mut self, id: NodeId) {
        self.declarations.push(id);
    }

    pub fn declaration(&mut self, name: &str, body: Vec<NodeId>, line: usize) -> NodeId {
        let id = self.push(
            SyntaxNode::Declaration {
                name: name.to_string(),
                body,
            },
            line,
        );
        self.add_declaration(id);
        id
    }

    pub fn literal(&mut self, text: &str, line: usize) -> NodeId {
        self.push(
            SyntaxNode::Literal {
                text: text.to_string(),
            },
            line,
        )
    }

    pub fn identifier(&mut self, name: &str, declaration: Option<NodeId>, line: usize) -> NodeId {
        self.push(
            SyntaxNode::Identifier {
                name: name.to_string(),
                declaration,
            },
            line,
        )
    }

    pub fn member(&mut self, target: NodeId, member: &str, line: usize) -> NodeId {
        self.push(
            SyntaxNode::MemberAccess {
                target,
                member: member.to_string(),
            },
            line,
        )
    }

    pub fn invocation(&mut self, callee: NodeId, arguments: Vec<NodeId>, line: usize) -> NodeId {
        self.push(SyntaxNode::Invocation { callee, arguments }, line)
    }

    /// Builds `receiver.method(arguments...)` with an unresolved receiver.
    pub fn method_call(
        &mut self,
        receiver: &str,
        method: &str,
        arguments: Vec<NodeId>,
        line: usize,
    ) -> NodeId {
        let target = self.identifier(receiver, None, line);
        let callee = self.member(target, method, line);
        self.invocation(callee, arguments, line)
    }

    pub fn composite(&mut self, elements: Vec<NodeId>, line: usize) -> NodeId {
        self.push(SyntaxNode::CompositeValue { elements }, line)
    }

    pub fn keyed(&mut self, key: &str, value: NodeId, line: usize) -> NodeId {
        self.push(
            SyntaxNode::KeyedElement {
                key: key.to_string(),
                value,
            },
            line,
        )
    }

    pub fn positional(&mut self, value: NodeId, line: usize) -> NodeId {
        self.push(SyntaxNode::PositionalElement { value }, line)
    }

    pub fn iteration(&mut self, source: Option<NodeId>, body: Vec<NodeId>, line: usize) -> NodeId {
        self.push(SyntaxNode::Iteration { source, body }, line)
    }

    pub fn closure(&mut self, body: Vec<NodeId>, line: usize) -> NodeId {
        self.push(SyntaxNode::Closure { body }, line)
    }

    pub fn indirection(&mut self, target: NodeId, line: usize) -> NodeId {
        self.push(SyntaxNode::Indirection { target }, line)
    }

    pub fn other(&mut self, kind: &str, line: usize) -> NodeId {
        self.push(
            SyntaxNode::Other {
                kind: kind.to_string(),
            },
            line,
        )
    }

    pub fn build(self) -> SyntaxTree {
        SyntaxTree {
            nodes: self.nodes,
            declarations: self.declarations,
        }
    }
}
