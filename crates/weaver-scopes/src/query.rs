//! Captures from Tree-sitter queries.
//!
//! Highlighting queries attach directives with `#set!`. A setting naming a
//! capture (`(#set! @name key value)`) applies to that capture only; an
//! unbound setting applies to every capture of its pattern. Settings keep
//! the order they were written in, which is the order adjustments run in.

use tree_sitter::{Node, Query, QueryCapture, QueryCursor, QueryMatch, StreamingIterator};

use crate::capture::{Capture, Properties};
use crate::node::TsNode;

/// Converts every capture of one query match.
#[must_use]
pub fn captures_for_match<'tree>(
    query: &Query,
    query_match: &QueryMatch<'_, 'tree>,
    source: &'tree str,
) -> Vec<Capture<TsNode<'tree>>> {
    query_match
        .captures
        .iter()
        .map(|captured| convert(query, query_match.pattern_index, captured, source))
        .collect()
}

/// Runs `query` over `node` and returns its captures in document order.
#[must_use]
pub fn collect_captures<'tree>(
    query: &Query,
    node: Node<'tree>,
    source: &'tree str,
) -> Vec<Capture<TsNode<'tree>>> {
    let mut cursor = QueryCursor::new();
    let mut captures = cursor.captures(query, node, source.as_bytes());
    let mut collected = Vec::new();
    while let Some((query_match, index)) = captures.next() {
        if let Some(captured) = query_match.captures.get(*index) {
            collected.push(convert(query, query_match.pattern_index, captured, source));
        }
    }
    collected
}

fn convert<'tree>(
    query: &Query,
    pattern_index: usize,
    captured: &QueryCapture<'tree>,
    source: &'tree str,
) -> Capture<TsNode<'tree>> {
    let capture_index = usize::try_from(captured.index).unwrap_or(usize::MAX);
    let name = query
        .capture_names()
        .get(capture_index)
        .copied()
        .unwrap_or_default();
    let properties: Properties = query
        .property_settings(pattern_index)
        .iter()
        .filter(|setting| setting.capture_id.is_none_or(|id| id == capture_index))
        .map(|setting| {
            (
                setting.key.to_string(),
                setting.value.as_deref().unwrap_or_default().to_owned(),
            )
        })
        .collect();

    Capture {
        node: TsNode::new(captured.node, source),
        name: name.to_owned(),
        properties,
    }
}
