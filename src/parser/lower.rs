//! Lowers a tree-sitter Go tree into the engine's `SyntaxTree`.
//!
//! Names are resolved while lowering: every identifier gets the value it was
//! bound to in the innermost enclosing scope, so the engine never has to look
//! at scopes itself.

use tracing::trace;
use tree_sitter::Node;

use super::kinds::{is_indirection_operator, NodeCategory};
use super::scope::ScopeStack;
use crate::engine::{NodeId, SyntaxTree, TreeBuilder};

pub struct Lowerer<'s> {
    source: &'s str,
    builder: TreeBuilder,
    scopes: ScopeStack,
}

impl<'s> Lowerer<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            builder: SyntaxTree::builder(),
            scopes: ScopeStack::new(),
        }
    }

    pub fn lower(mut self, root: Node) -> SyntaxTree {
        let top_level = named_children(&root);

        // Package-level tables must be visible to every function.
        for node in &top_level {
            if matches!(
                NodeCategory::of(node.kind()),
                NodeCategory::VariableDeclaration | NodeCategory::ConstantDeclaration
            ) {
                self.lower_var_declaration(node);
            }
        }

        for node in &top_level {
            if NodeCategory::of(node.kind()) == NodeCategory::FunctionDeclaration {
                self.lower_function(node);
            }
        }

        self.builder.build()
    }

    fn text(&self, node: &Node) -> &'s str {
        let source = self.source;
        source.get(node.byte_range()).unwrap_or_default()
    }

    fn lower_function(&mut self, node: &Node) -> NodeId {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.text(&n))
            .unwrap_or_default();

        self.scopes.push();
        for field in ["receiver", "parameters"] {
            if let Some(list) = node.child_by_field_name(field) {
                self.shadow_parameters(&list);
            }
        }
        let body = match node.child_by_field_name("body") {
            Some(block) => self.lower_block(&block),
            None => Vec::new(),
        };
        self.scopes.pop();

        trace!(name, statements = body.len(), "lowered function");
        self.builder.declaration(name, body, line_of(node))
    }

    fn shadow_parameters(&mut self, list: &Node) {
        for declaration in named_children(list) {
            for name in field_children(&declaration, "name") {
                let name = self.text(&name);
                self.scopes.shadow(name);
            }
        }
    }

    fn lower_block(&mut self, block: &Node) -> Vec<NodeId> {
        self.scopes.push();
        let mut statements = Vec::new();
        for child in named_children(block) {
            // Newer grammars wrap block contents in a statement_list.
            if child.kind() == "statement_list" {
                for statement in named_children(&child) {
                    statements.push(self.lower_statement(&statement));
                }
            } else {
                statements.push(self.lower_statement(&child));
            }
        }
        self.scopes.pop();
        statements
    }

    fn lower_statement(&mut self, node: &Node) -> NodeId {
        let category = NodeCategory::of(node.kind());
        match category {
            NodeCategory::ExpressionStatement => match named_children(node).first() {
                Some(expression) => self.lower_expression(expression),
                None => self.builder.other(node.kind(), line_of(node)),
            },
            NodeCategory::ForStatement => self.lower_for(node),
            _ if category.is_declaration() => {
                if category == NodeCategory::ShortVarDeclaration {
                    self.lower_short_var(node);
                } else {
                    self.lower_var_declaration(node);
                }
                self.builder.other(node.kind(), line_of(node))
            }
            _ => self.builder.other(node.kind(), line_of(node)),
        }
    }

    /// `a, b := x, y`. Right-hand sides are lowered before the names come
    /// into scope.
    fn lower_short_var(&mut self, node: &Node) {
        let names = match node.child_by_field_name("left") {
            Some(left) => self.identifier_names(&left),
            None => Vec::new(),
        };
        let values = match node.child_by_field_name("right") {
            Some(right) => self.lower_all(named_children(&right)),
            None => Vec::new(),
        };
        self.bind_positionally(&names, &values);
    }

    fn lower_var_declaration(&mut self, node: &Node) {
        for child in named_children(node) {
            match child.kind() {
                "var_spec" | "const_spec" => self.lower_spec(&child),
                "var_spec_list" | "const_spec_list" => self.lower_var_declaration(&child),
                _ => {}
            }
        }
    }

    fn lower_spec(&mut self, spec: &Node) {
        let names: Vec<&'s str> = field_children(spec, "name")
            .iter()
            .map(|n| self.text(n))
            .collect();
        let values = match spec.child_by_field_name("value") {
            Some(list) => self.lower_all(named_children(&list)),
            None => Vec::new(),
        };
        self.bind_positionally(&names, &values);
    }

    /// Multi-value calls (`a, b := f()`) leave every name unresolved.
    fn bind_positionally(&mut self, names: &[&str], values: &[NodeId]) {
        if names.len() == values.len() {
            for (name, value) in names.iter().zip(values) {
                self.scopes.bind(name, Some(*value));
            }
        } else {
            for name in names {
                self.scopes.shadow(name);
            }
        }
    }

    fn lower_for(&mut self, node: &Node) -> NodeId {
        self.scopes.push();
        let mut source = None;
        for child in named_children(node) {
            match child.kind() {
                "range_clause" => source = self.lower_range_clause(&child),
                "for_clause" => self.shadow_clause_variables(&child),
                _ => {}
            }
        }
        let body = match node.child_by_field_name("body") {
            Some(block) => self.lower_block(&block),
            None => Vec::new(),
        };
        self.scopes.pop();
        self.builder.iteration(source, body, line_of(node))
    }

    /// `for key, value := range source`: the value variable stands for a row
    /// of `source`; the key is never a name we can read statically.
    fn lower_range_clause(&mut self, clause: &Node) -> Option<NodeId> {
        let right = clause.child_by_field_name("right")?;
        let source = self.lower_expression(&right);

        if let Some(left) = clause.child_by_field_name("left") {
            let names = self.identifier_names(&left);
            if let Some(key) = names.first() {
                self.scopes.shadow(key);
            }
            if let Some(value) = names.get(1) {
                self.scopes.bind(value, Some(source));
            }
        }
        Some(source)
    }

    fn shadow_clause_variables(&mut self, clause: &Node) {
        let Some(init) = clause.child_by_field_name("initializer") else {
            return;
        };
        if let Some(left) = init.child_by_field_name("left") {
            for name in self.identifier_names(&left) {
                self.scopes.shadow(name);
            }
        }
    }

    fn identifier_names(&self, list: &Node) -> Vec<&'s str> {
        if list.kind() == "identifier" {
            return vec![self.text(list)];
        }
        named_children(list)
            .iter()
            .filter(|n| n.kind() == "identifier")
            .map(|n| self.text(n))
            .collect()
    }

    fn lower_all(&mut self, nodes: Vec<Node>) -> Vec<NodeId> {
        let mut lowered = Vec::with_capacity(nodes.len());
        for node in &nodes {
            lowered.push(self.lower_expression(node));
        }
        lowered
    }

    fn lower_expression(&mut self, node: &Node) -> NodeId {
        let line = line_of(node);
        match NodeCategory::of(node.kind()) {
            NodeCategory::CallExpression => {
                let callee = match node.child_by_field_name("function") {
                    Some(function) => self.lower_expression(&function),
                    None => self.builder.other(node.kind(), line),
                };
                let arguments = match node.child_by_field_name("arguments") {
                    Some(list) => self.lower_all(named_children(&list)),
                    None => Vec::new(),
                };
                self.builder.invocation(callee, arguments, line)
            }
            NodeCategory::SelectorExpression => {
                let target = match node.child_by_field_name("operand") {
                    Some(operand) => self.lower_expression(&operand),
                    None => self.builder.other(node.kind(), line),
                };
                let member = node
                    .child_by_field_name("field")
                    .map(|f| self.text(&f))
                    .unwrap_or_default();
                self.builder.member(target, member, line)
            }
            NodeCategory::UnaryExpression => {
                let operator = node
                    .child_by_field_name("operator")
                    .map(|op| self.text(&op))
                    .unwrap_or_default();
                match node.child_by_field_name("operand") {
                    Some(operand) if is_indirection_operator(operator) => {
                        let target = self.lower_expression(&operand);
                        self.builder.indirection(target, line)
                    }
                    _ => self.builder.other(node.kind(), line),
                }
            }
            NodeCategory::ParenthesizedExpression | NodeCategory::LiteralElement => {
                match named_children(node).first() {
                    Some(inner) => self.lower_expression(inner),
                    None => self.builder.other(node.kind(), line),
                }
            }
            NodeCategory::CompositeLiteral => match node.child_by_field_name("body") {
                Some(body) => self.lower_literal_value(&body),
                None => self.builder.other(node.kind(), line),
            },
            NodeCategory::LiteralValue => self.lower_literal_value(node),
            NodeCategory::Literal => {
                let text = self.text(node);
                self.builder.literal(text, line)
            }
            NodeCategory::FunctionLiteral => {
                self.scopes.push();
                if let Some(list) = node.child_by_field_name("parameters") {
                    self.shadow_parameters(&list);
                }
                let body = match node.child_by_field_name("body") {
                    Some(block) => self.lower_block(&block),
                    None => Vec::new(),
                };
                self.scopes.pop();
                self.builder.closure(body, line)
            }
            NodeCategory::Identifier => {
                let name = self.text(node);
                let declaration = self.scopes.lookup(name);
                self.builder.identifier(name, declaration, line)
            }
            _ => self.builder.other(node.kind(), line),
        }
    }

    fn lower_literal_value(&mut self, node: &Node) -> NodeId {
        let mut elements = Vec::new();
        for child in named_children(node) {
            let element = if child.kind() == "keyed_element" {
                self.lower_keyed_element(&child)
            } else {
                let value = self.lower_expression(&child);
                self.builder.positional(value, line_of(&child))
            };
            elements.push(element);
        }
        self.builder.composite(elements, line_of(node))
    }

    /// `name: "x"` in struct rows, `"x": {...}` in map rows.
    fn lower_keyed_element(&mut self, node: &Node) -> NodeId {
        let parts = named_children(node);
        let (Some(key), Some(value)) = (parts.first(), parts.last()) else {
            return self.builder.other(node.kind(), line_of(node));
        };
        if parts.len() < 2 {
            return self.builder.other(node.kind(), line_of(node));
        }

        let key = self.text(&unwrap_element(key));
        let value = self.lower_expression(value);
        self.builder.keyed(key, value, line_of(node))
    }
}

fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}

fn named_children<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut children = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if NodeCategory::of(child.kind()) != NodeCategory::Comment {
            children.push(child);
        }
    }
    children
}

fn field_children<'t>(node: &Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    let children: Vec<Node<'t>> = node.children_by_field_name(field, &mut cursor).collect();
    children
}

fn unwrap_element<'t>(node: &Node<'t>) -> Node<'t> {
    if NodeCategory::of(node.kind()) == NodeCategory::LiteralElement {
        if let Some(inner) = named_children(node).first() {
            return *inner;
        }
    }
    *node
}
