use serde::Serialize;

/// Why a candidate subtest name could not be determined statically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Name produced at run time: a call result or a closure.
    DynamicName,
    UnresolvedIdentifier,
    /// The referenced collection is not a composite literal.
    NotATable,
    /// A table row carries no value for the name field.
    MissingField,
    /// Name position holds a nested composite.
    NotAName,
    EmptyName,
    MissingArgument,
    ReferenceDepthExceeded,
    /// A node id that does not exist in the tree.
    DanglingNode,
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DynamicName => "dynamic_name",
            Self::UnresolvedIdentifier => "unresolved_identifier",
            Self::NotATable => "not_a_table",
            Self::MissingField => "missing_field",
            Self::NotAName => "not_a_name",
            Self::EmptyName => "empty_name",
            Self::MissingArgument => "missing_argument",
            Self::ReferenceDepthExceeded => "reference_depth_exceeded",
            Self::DanglingNode => "dangling_node",
            Self::UnexpectedShape { .. } => "unexpected_shape",
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::UnexpectedShape { .. } | Self::DanglingNode => DiagnosticKind::UnexpectedShape,
            _ => DiagnosticKind::Ambiguity,
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedShape { expected, found } => {
                write!(f, "unexpected_shape (expected {expected}, found {found})")
            }
            _ => write!(f, "{}", self.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Expected and harmless: the name is only knowable at run time.
    Ambiguity,
    /// A construct the resolver has no pattern for.
    UnexpectedShape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub line: usize,
    pub kind: DiagnosticKind,
    pub reason: SkipReason,
}

impl Diagnostic {
    pub fn new(line: usize, reason: SkipReason) -> Self {
        Self {
            line,
            kind: reason.kind(),
            reason,
        }
    }

    pub fn is_fault(&self) -> bool {
        self.kind == DiagnosticKind::UnexpectedShape
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

/// Outcome of one resolution step. Skips carry their reason instead of
/// unwinding, so the caller decides whether to continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<T> {
    Resolved(T),
    Skipped(SkipReason),
}

impl<T> Resolution<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolution<U> {
        match self {
            Self::Resolved(value) => Resolution::Resolved(f(value)),
            Self::Skipped(reason) => Resolution::Skipped(reason),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> Resolution<U>) -> Resolution<U> {
        match self {
            Self::Resolved(value) => f(value),
            Self::Skipped(reason) => Resolution::Skipped(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_as_str() {
        assert_eq!(SkipReason::DynamicName.as_str(), "dynamic_name");
        assert_eq!(SkipReason::NotATable.as_str(), "not_a_table");
    }

    #[test]
    fn test_reason_display_with_shape() {
        let reason = SkipReason::UnexpectedShape {
            expected: "row element",
            found: "other",
        };
        assert_eq!(
            reason.to_string(),
            "unexpected_shape (expected row element, found other)"
        );
    }

    #[test]
    fn test_only_shape_faults_are_faults() {
        assert!(!Diagnostic::new(1, SkipReason::DynamicName).is_fault());
        assert!(!Diagnostic::new(1, SkipReason::UnresolvedIdentifier).is_fault());
        assert!(Diagnostic::new(1, SkipReason::DanglingNode).is_fault());
        assert!(Diagnostic::new(
            1,
            SkipReason::UnexpectedShape {
                expected: "literal",
                found: "other"
            }
        )
        .is_fault());
    }

    #[test]
    fn test_resolution_combinators() {
        let resolved: Resolution<u8> = Resolution::Resolved(2);
        assert_eq!(resolved.clone().map(|v| v * 2), Resolution::Resolved(4));
        assert_eq!(resolved.ok(), Some(2));

        let skipped: Resolution<u8> = Resolution::Skipped(SkipReason::EmptyName);
        assert_eq!(skipped.clone().ok(), None);
        assert_eq!(
            skipped.and_then(|v| Resolution::Resolved(v + 1)),
            Resolution::Skipped(SkipReason::EmptyName)
        );
    }
}
