//! [`SyntaxNode`] implementation for Tree-sitter trees.

use std::fmt;

use super::{NodeId, SyntaxNode};
use crate::position::Position;

/// A Tree-sitter node paired with the source it was parsed from.
///
/// Tree-sitter nodes do not own their text, so the adapter carries the
/// source alongside to answer [`SyntaxNode::text`].
#[derive(Clone, Copy)]
pub struct TsNode<'tree> {
    node: tree_sitter::Node<'tree>,
    source: &'tree str,
}

impl<'tree> TsNode<'tree> {
    /// Wraps a node of a tree parsed from `source`.
    #[must_use]
    pub const fn new(node: tree_sitter::Node<'tree>, source: &'tree str) -> Self {
        Self { node, source }
    }

    /// Returns the wrapped Tree-sitter node.
    #[must_use]
    pub const fn inner(&self) -> tree_sitter::Node<'tree> {
        self.node
    }

    fn wrap(&self, node: Option<tree_sitter::Node<'tree>>) -> Option<Self> {
        node.map(|inner| Self::new(inner, self.source))
    }
}

impl fmt::Debug for TsNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TsNode")
            .field("kind", &self.node.kind())
            .field("range", &self.node.byte_range())
            .finish()
    }
}

impl SyntaxNode for TsNode<'_> {
    fn id(&self) -> NodeId {
        NodeId::new(self.node.id())
    }

    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn text(&self) -> &str {
        self.source.get(self.node.byte_range()).unwrap_or_default()
    }

    fn start_position(&self) -> Position {
        self.node.start_position().into()
    }

    fn end_position(&self) -> Position {
        self.node.end_position().into()
    }

    fn start_index(&self) -> usize {
        self.node.start_byte()
    }

    fn end_index(&self) -> usize {
        self.node.end_byte()
    }

    fn parent(&self) -> Option<Self> {
        self.wrap(self.node.parent())
    }

    fn child_count(&self) -> usize {
        self.node.child_count()
    }

    fn child(&self, index: usize) -> Option<Self> {
        self.wrap(self.node.child(index))
    }

    fn first_named_child(&self) -> Option<Self> {
        self.wrap(self.node.named_child(0))
    }

    fn last_named_child(&self) -> Option<Self> {
        let last = self.node.named_child_count().checked_sub(1)?;
        self.wrap(self.node.named_child(last))
    }

    fn next_sibling(&self) -> Option<Self> {
        self.wrap(self.node.next_sibling())
    }

    fn previous_sibling(&self) -> Option<Self> {
        self.wrap(self.node.prev_sibling())
    }

    fn next_named_sibling(&self) -> Option<Self> {
        self.wrap(self.node.next_named_sibling())
    }

    fn previous_named_sibling(&self) -> Option<Self> {
        self.wrap(self.node.prev_named_sibling())
    }

    fn descendants_of_type(&self, kind: &str) -> Vec<Self> {
        collect_descendants(self.node, kind)
            .into_iter()
            .map(|node| Self::new(node, self.source))
            .collect()
    }

    fn is_error(&self) -> bool {
        self.node.is_error()
    }

    fn has_error(&self) -> bool {
        self.node.has_error()
    }
}

/// Collects strict descendants of a given grammar type in pre-order, walking
/// the subtree with a single cursor.
fn collect_descendants<'tree>(
    node: tree_sitter::Node<'tree>,
    kind: &str,
) -> Vec<tree_sitter::Node<'tree>> {
    let mut found = Vec::new();
    let mut cursor = node.walk();
    if !cursor.goto_first_child() {
        return found;
    }
    loop {
        let current = cursor.node();
        if current.kind() == kind {
            found.push(current);
        }
        if cursor.goto_first_child() {
            continue;
        }
        while !cursor.goto_next_sibling() {
            if !cursor.goto_parent() || cursor.node().id() == node.id() {
                return found;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::parse_rust;

    #[test]
    fn wraps_positions_and_text() {
        let parsed = parse_rust("fn main() {}");
        let root = parsed.root();
        let function = root.first_named_child().expect("function item");
        let name = function.child(1).expect("identifier");

        assert_eq!(function.kind(), "function_item");
        assert_eq!(name.kind(), "identifier");
        assert_eq!(name.text(), "main");
        assert_eq!(name.start_position(), Position::new(0, 3));
        assert_eq!(name.end_position(), Position::new(0, 7));
        assert_eq!((name.start_index(), name.end_index()), (3, 7));
    }

    #[test]
    fn navigation_preserves_identity() {
        let parsed = parse_rust("fn main() {}");
        let function = parsed.root().first_named_child().expect("function item");
        let name = function.child(1).expect("identifier");

        let parent = name.parent().expect("parent");
        assert_eq!(parent.id(), function.id());
        assert_ne!(name.id(), function.id());
        assert_eq!(
            name.next_sibling().and_then(|n| n.previous_sibling()).map(|n| n.id()),
            Some(name.id())
        );
    }

    #[test]
    fn descendants_of_type_excludes_self() {
        let parsed = parse_rust("fn outer() { fn inner() {} }");
        let outer = parsed.root().first_named_child().expect("outer function");

        let functions = outer.descendants_of_type("function_item");
        assert_eq!(functions.len(), 1);
        assert_eq!(functions.first().map(SyntaxNode::text), Some("fn inner() {}"));
    }

    #[test]
    fn descendants_of_type_come_in_document_order() {
        let parsed = parse_rust("fn a() { b(c(1), 2); }\nfn d() {}");
        let root = parsed.root();

        let names: Vec<_> = root
            .descendants_of_type("identifier")
            .iter()
            .map(|n| n.text().to_owned())
            .collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
        assert!(root.descendants_of_type("string_literal").is_empty());
    }

    #[test]
    fn descendants_of_type_survives_deep_nesting() {
        const DEPTH: usize = 40_000;
        let source = format!(
            "fn f() {{ let x = {}1{}; }}",
            "(".repeat(DEPTH),
            ")".repeat(DEPTH)
        );
        let parsed = parse_rust(&source);
        let root = parsed.root();
        assert!(!root.has_error());

        assert_eq!(root.descendants_of_type("integer_literal").len(), 1);
        assert_eq!(
            root.descendants_of_type("parenthesized_expression").len(),
            DEPTH
        );
    }

    #[test]
    fn ancestors_walk_to_the_root() {
        let parsed = parse_rust("fn main() {}");
        let function = parsed.root().first_named_child().expect("function item");
        let name = function.child(1).expect("identifier");

        let kinds: Vec<_> = name.ancestors().map(|n| n.kind().to_owned()).collect();
        assert_eq!(kinds, ["function_item", "source_file"]);
    }
}
