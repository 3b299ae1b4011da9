// Name-argument strategies for subtest launches.
//
// Applied in order; the first strategy whose `can_handle` accepts the node
// decides the outcome:
// 1. Literal    - `t.Run("case", ...)`
// 2. Field      - `t.Run(tt.name, ...)`, read from the ranged-over table
// 3. Identifier - `name := "case"; t.Run(name, ...)`

pub mod field;
pub mod identifier;
pub mod literal;

pub use field::FieldStrategy;
pub use identifier::IdentifierStrategy;
pub use literal::LiteralStrategy;

/// One resolved path segment and the line it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub line: usize,
}
