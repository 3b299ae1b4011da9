//! Table lookup for table-driven subtests.
//!
//! Given `tt.name` inside `for _, tt := range tests`, follows `tt` back to
//! the literal `tests` was declared with and reads the `name` field of every
//! row, in row order.

use tracing::debug;

use super::context::Context;
use super::outcome::{Resolution, SkipReason};
use super::strategies::Segment;
use super::tree::{NodeId, SyntaxNode};
use crate::utils::strip_delimiters;

/// Follows identifier back-references and indirections until a node that is
/// neither, bounded by the configured hop limit.
pub fn dereference(id: NodeId, ctx: &Context) -> Resolution<NodeId> {
    let mut current = id;
    for _ in 0..=ctx.config().max_reference_hops {
        match ctx.node(current) {
            None => return Resolution::Skipped(SkipReason::DanglingNode),
            Some(SyntaxNode::Identifier {
                declaration: Some(decl),
                ..
            }) => current = *decl,
            Some(SyntaxNode::Identifier {
                declaration: None, ..
            }) => return Resolution::Skipped(SkipReason::UnresolvedIdentifier),
            Some(SyntaxNode::Indirection { target }) => current = *target,
            Some(_) => return Resolution::Resolved(current),
        }
    }
    Resolution::Skipped(SkipReason::ReferenceDepthExceeded)
}

/// Row names for `field` of the collection `reference` points at.
///
/// A row that cannot be named is recorded as a diagnostic and skipped; the
/// remaining rows still resolve.
pub fn lookup(field: &str, reference: NodeId, ctx: &Context) -> Resolution<Vec<Segment>> {
    let collection = match dereference(reference, ctx) {
        Resolution::Resolved(id) => id,
        Resolution::Skipped(reason) => return Resolution::Skipped(reason),
    };

    let elements = match ctx.node(collection) {
        Some(SyntaxNode::CompositeValue { elements }) => elements,
        _ => return Resolution::Skipped(SkipReason::NotATable),
    };

    let rows: Vec<Option<NodeId>> = elements.iter().map(|&e| row_body(e, ctx)).collect();

    // A lone struct literal rather than a table: `tc := testCase{name: "x"}`.
    if !rows.is_empty() && rows.iter().all(Option::is_none) {
        return match record_name(collection, field, ctx) {
            Some(segment) => Resolution::Resolved(vec![segment]),
            None => Resolution::Skipped(SkipReason::NotATable),
        };
    }

    let mut names = Vec::new();
    for (&element, row) in elements.iter().zip(rows) {
        let resolved = match row {
            Some(row) => row_name(row, field, ctx),
            None => Resolution::Skipped(SkipReason::UnexpectedShape {
                expected: "table row",
                found: kind_of(element, ctx),
            }),
        };

        match resolved {
            Resolution::Resolved(segment) => names.push(segment),
            Resolution::Skipped(reason) => {
                debug!(field, line = ctx.line(element), %reason, "skipping table row");
                ctx.record(element, reason);
            }
        }
    }

    Resolution::Resolved(names)
}

/// The composite body of a table row, if the element is shaped like one.
/// Slice rows are positional, map rows are keyed by the map key.
fn row_body(element: NodeId, ctx: &Context) -> Option<NodeId> {
    let value = match ctx.node(element)? {
        SyntaxNode::PositionalElement { value } | SyntaxNode::KeyedElement { value, .. } => *value,
        _ => return None,
    };
    let body = dereference(value, ctx).ok()?;
    matches!(ctx.node(body), Some(SyntaxNode::CompositeValue { .. })).then_some(body)
}

fn record_name(record: NodeId, field: &str, ctx: &Context) -> Option<Segment> {
    let Some(SyntaxNode::CompositeValue { elements }) = ctx.node(record) else {
        return None;
    };
    elements.iter().find_map(|&e| match ctx.node(e) {
        Some(SyntaxNode::KeyedElement { key, value }) if key == field => {
            name_value(*value, ctx.line(e), ctx).ok()
        }
        _ => None,
    })
}

/// Name of one row. Keyed rows use the matching field; unkeyed rows assume
/// the name is the first field.
fn row_name(row: NodeId, field: &str, ctx: &Context) -> Resolution<Segment> {
    let Some(SyntaxNode::CompositeValue { elements }) = ctx.node(row) else {
        return Resolution::Skipped(SkipReason::NotATable);
    };
    let line = ctx.line(row);

    for (index, &element) in elements.iter().enumerate() {
        match ctx.node(element) {
            Some(SyntaxNode::KeyedElement { key, value }) => {
                if key == field {
                    return name_value(*value, line, ctx);
                }
            }
            Some(SyntaxNode::PositionalElement { value }) => {
                if index == 0 {
                    return name_value(*value, line, ctx);
                }
            }
            Some(other) => {
                return Resolution::Skipped(SkipReason::UnexpectedShape {
                    expected: "row element",
                    found: other.kind_name(),
                })
            }
            None => return Resolution::Skipped(SkipReason::DanglingNode),
        }
    }

    Resolution::Skipped(SkipReason::MissingField)
}

fn name_value(value: NodeId, line: usize, ctx: &Context) -> Resolution<Segment> {
    match ctx.node(value) {
        Some(SyntaxNode::Literal { text }) => literal_segment(text, line),
        Some(SyntaxNode::Identifier { .. }) => match dereference(value, ctx) {
            Resolution::Resolved(target) => match ctx.node(target) {
                Some(SyntaxNode::Literal { text }) => literal_segment(text, line),
                _ => Resolution::Skipped(SkipReason::UnresolvedIdentifier),
            },
            Resolution::Skipped(reason) => Resolution::Skipped(reason),
        },
        Some(SyntaxNode::Closure { .. }) | Some(SyntaxNode::Invocation { .. }) => {
            Resolution::Skipped(SkipReason::DynamicName)
        }
        Some(SyntaxNode::CompositeValue { .. }) => Resolution::Skipped(SkipReason::NotAName),
        Some(other) => Resolution::Skipped(SkipReason::UnexpectedShape {
            expected: "literal",
            found: other.kind_name(),
        }),
        None => Resolution::Skipped(SkipReason::DanglingNode),
    }
}

pub(crate) fn literal_segment(text: &str, line: usize) -> Resolution<Segment> {
    let name = strip_delimiters(text);
    if name.is_empty() {
        return Resolution::Skipped(SkipReason::EmptyName);
    }
    Resolution::Resolved(Segment { name, line })
}

fn kind_of(id: NodeId, ctx: &Context) -> &'static str {
    ctx.node(id).map(SyntaxNode::kind_name).unwrap_or("missing")
}
