use std::collections::HashMap;

use crate::engine::NodeId;

/// The blank identifier never binds.
const BLANK: &str = "_";

/// Lexical scopes active while lowering, innermost last.
///
/// A binding of `None` marks a name that is in scope but whose value is
/// unknown (parameters, range keys), so it shadows outer bindings.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<HashMap<String, Option<NodeId>>>,
}

impl ScopeStack {
    /// Starts with the package scope.
    pub fn new() -> Self {
        Self {
            frames: vec![HashMap::new()],
        }
    }

    pub fn push(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// The package scope is never popped.
    pub fn pop(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn bind(&mut self, name: &str, value: Option<NodeId>) {
        if name == BLANK {
            return;
        }
        if let Some(frame) = self.frames.last_mut() {
            frame.insert(name.to_string(), value);
        }
    }

    pub fn shadow(&mut self, name: &str) {
        self.bind(name, None);
    }

    /// Value of the innermost binding for `name`, if any and known.
    pub fn lookup(&self, name: &str) -> Option<NodeId> {
        self.frames
            .iter()
            .rev()
            .find_map(|frame| frame.get(name))
            .copied()
            .flatten()
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SyntaxTree;

    fn two_ids() -> (NodeId, NodeId) {
        let mut b = SyntaxTree::builder();
        (b.literal("\"a\"", 1), b.literal("\"b\"", 2))
    }

    #[test]
    fn test_inner_binding_wins() {
        let (outer, inner) = two_ids();
        let mut scopes = ScopeStack::new();
        scopes.bind("name", Some(outer));
        scopes.push();
        scopes.bind("name", Some(inner));
        assert_eq!(scopes.lookup("name"), Some(inner));
        scopes.pop();
        assert_eq!(scopes.lookup("name"), Some(outer));
    }

    #[test]
    fn test_shadow_hides_outer_value() {
        let (outer, _) = two_ids();
        let mut scopes = ScopeStack::new();
        scopes.bind("t", Some(outer));
        scopes.push();
        scopes.shadow("t");
        assert_eq!(scopes.lookup("t"), None);
    }

    #[test]
    fn test_blank_identifier_is_ignored() {
        let (value, _) = two_ids();
        let mut scopes = ScopeStack::new();
        scopes.bind("_", Some(value));
        assert_eq!(scopes.lookup("_"), None);
    }

    #[test]
    fn test_package_scope_survives_pop() {
        let mut scopes = ScopeStack::new();
        scopes.pop();
        scopes.pop();
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(ScopeStack::new().lookup("missing"), None);
    }
}
