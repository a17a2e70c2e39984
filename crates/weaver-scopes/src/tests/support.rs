//! Shared fixtures for unit and behaviour tests.

use std::collections::BTreeMap;

use tree_sitter::{Parser, Query, Tree};

use crate::{BoundaryMap, LayerContext, SourceBuffer, SyntaxNode, TsNode};

/// Rust source parsed with the Tree-sitter Rust grammar.
pub(crate) struct ParsedSource {
    tree: Tree,
    buffer: SourceBuffer,
}

impl ParsedSource {
    pub(crate) fn root(&self) -> TsNode<'_> {
        TsNode::new(self.tree.root_node(), self.buffer.text())
    }

    pub(crate) const fn tree(&self) -> &Tree {
        &self.tree
    }

    pub(crate) fn source(&self) -> &str {
        self.buffer.text()
    }

    pub(crate) const fn buffer(&self) -> &SourceBuffer {
        &self.buffer
    }

    pub(crate) fn layer(&self) -> LayerContext<'_> {
        LayerContext::root(&self.buffer)
    }

    pub(crate) fn injected_layer(&self, depth: usize) -> LayerContext<'_> {
        LayerContext::new(&self.buffer, depth)
    }
}

pub(crate) fn parse_rust(source: &str) -> ParsedSource {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_rust::LANGUAGE.into())
        .expect("rust grammar");
    let tree = parser.parse(source, None).expect("parse");
    ParsedSource {
        tree,
        buffer: SourceBuffer::new(source),
    }
}

pub(crate) fn rust_query(text: &str) -> Query {
    Query::new(&tree_sitter_rust::LANGUAGE.into(), text).expect("query")
}

/// First node of `kind` in document order, starting with `root` itself.
pub(crate) fn node_at<'tree>(root: &TsNode<'tree>, kind: &str) -> TsNode<'tree> {
    nodes_of(root, kind)
        .into_iter()
        .next()
        .unwrap_or_else(|| panic!("no {kind} node"))
}

/// Every node of `kind` in document order, starting with `root` itself.
pub(crate) fn nodes_of<'tree>(root: &TsNode<'tree>, kind: &str) -> Vec<TsNode<'tree>> {
    let own = (root.kind() == kind).then_some(*root);
    own.into_iter()
        .chain(root.descendants_of_type(kind))
        .collect()
}

/// Renders boundaries in position order, closes before opens.
///
/// Each line reads `row:column -closed +opened`.
pub(crate) fn render(boundaries: &BoundaryMap<String>) -> Vec<String> {
    let ordered: BTreeMap<_, _> = boundaries.iter().collect();
    ordered
        .into_iter()
        .map(|(position, bundle)| {
            let closes = bundle.close().iter().map(|id| format!(" -{id}"));
            let opens = bundle.open().iter().map(|id| format!(" +{id}"));
            let mut line = position.to_string();
            line.extend(closes.chain(opens));
            line
        })
        .collect()
}
