pub mod kinds;
pub mod lower;
pub mod scope;

pub use kinds::NodeCategory;
pub use lower::Lowerer;
pub use scope::ScopeStack;

use std::path::Path;

use tracing::{debug, warn};

use crate::engine::SyntaxTree;
use crate::error::ParserError;

/// Go source parser producing the engine's tree.
pub struct GoParser {
    parser: tree_sitter::Parser,
}

impl GoParser {
    pub fn new() -> Result<Self, ParserError> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|_| ParserError::language_setup_failed("go"))?;
        Ok(Self { parser })
    }

    /// Parses and lowers one file. Files with syntax errors are still
    /// lowered; whatever parsed cleanly remains discoverable.
    pub fn parse(&mut self, source: &str, path: &Path) -> Result<SyntaxTree, ParserError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| ParserError::parse_failed(path))?;

        let root = tree.root_node();
        if root.has_error() {
            warn!(path = %path.display(), "syntax errors in file, discovering what parsed");
        }

        let lowered = Lowerer::new(source).lower(root);
        debug!(
            path = %path.display(),
            nodes = lowered.len(),
            declarations = lowered.declarations().len(),
            "lowered file"
        );
        Ok(lowered)
    }

    pub fn parse_bytes(&mut self, bytes: &[u8], path: &Path) -> Result<SyntaxTree, ParserError> {
        let source = std::str::from_utf8(bytes).map_err(|_| ParserError::invalid_encoding(path))?;
        self.parse(source, path)
    }
}
