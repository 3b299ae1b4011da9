/// Grammar node kinds the lowering pass distinguishes.
///
/// Everything not listed maps to `Other` and is lowered as an opaque node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    FunctionDeclaration,
    VariableDeclaration,
    ConstantDeclaration,
    ShortVarDeclaration,
    ExpressionStatement,
    ForStatement,
    CallExpression,
    SelectorExpression,
    UnaryExpression,
    ParenthesizedExpression,
    CompositeLiteral,
    LiteralValue,
    KeyedElement,
    LiteralElement,
    Literal,
    FunctionLiteral,
    Identifier,
    Comment,
    Other,
}

impl NodeCategory {
    pub fn of(kind: &str) -> Self {
        match kind {
            "function_declaration" | "method_declaration" => Self::FunctionDeclaration,
            "var_declaration" => Self::VariableDeclaration,
            "const_declaration" => Self::ConstantDeclaration,
            "short_var_declaration" => Self::ShortVarDeclaration,
            "expression_statement" => Self::ExpressionStatement,
            "for_statement" => Self::ForStatement,
            "call_expression" => Self::CallExpression,
            "selector_expression" => Self::SelectorExpression,
            "unary_expression" => Self::UnaryExpression,
            "parenthesized_expression" => Self::ParenthesizedExpression,
            "composite_literal" => Self::CompositeLiteral,
            "literal_value" => Self::LiteralValue,
            "keyed_element" => Self::KeyedElement,
            "literal_element" => Self::LiteralElement,
            "interpreted_string_literal"
            | "raw_string_literal"
            | "int_literal"
            | "float_literal"
            | "imaginary_literal"
            | "rune_literal" => Self::Literal,
            "func_literal" => Self::FunctionLiteral,
            "identifier" => Self::Identifier,
            "comment" => Self::Comment,
            _ => Self::Other,
        }
    }

    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            Self::VariableDeclaration | Self::ConstantDeclaration | Self::ShortVarDeclaration
        )
    }
}

/// Unary operators that only change how a value is reached.
pub fn is_indirection_operator(operator: &str) -> bool {
    matches!(operator, "&" | "*")
}
