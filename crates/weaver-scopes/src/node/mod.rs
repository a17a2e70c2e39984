//! The syntax node collaborator.
//!
//! The resolver only needs a small, navigation-oriented view of a syntax
//! tree. [`SyntaxNode`] captures that view so the resolver can run over
//! Tree-sitter trees ([`TsNode`]) or any other arena-backed tree.

mod ts_node;

pub use ts_node::TsNode;

use crate::position::{Position, TextRange};

/// Stable identity of a node within its tree.
///
/// Handles compare by value; two handles are equal exactly when they denote
/// the same node of the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Wraps a raw arena index or node address.
    #[must_use]
    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw value behind the handle.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// A node of a syntax tree as seen by the resolver.
///
/// Navigation methods return owned handles, so implementors are expected to
/// be cheap to copy (Tree-sitter nodes are two words plus a tree pointer).
pub trait SyntaxNode: Sized {
    /// Stable identity of this node.
    fn id(&self) -> NodeId;

    /// Grammar type of the node.
    fn kind(&self) -> &str;

    /// Source text covered by the node.
    fn text(&self) -> &str;

    /// Position of the first byte of the node.
    fn start_position(&self) -> Position;

    /// Position one past the last byte of the node.
    fn end_position(&self) -> Position;

    /// Index of the first byte of the node.
    fn start_index(&self) -> usize;

    /// Index one past the last byte of the node.
    fn end_index(&self) -> usize;

    /// The enclosing node, if any.
    fn parent(&self) -> Option<Self>;

    /// Number of children, named and anonymous.
    fn child_count(&self) -> usize;

    /// Child at `index`, counting anonymous children.
    fn child(&self, index: usize) -> Option<Self>;

    /// First named child.
    fn first_named_child(&self) -> Option<Self>;

    /// Last named child.
    fn last_named_child(&self) -> Option<Self>;

    /// Following sibling, named or anonymous.
    fn next_sibling(&self) -> Option<Self>;

    /// Preceding sibling, named or anonymous.
    fn previous_sibling(&self) -> Option<Self>;

    /// Following named sibling.
    fn next_named_sibling(&self) -> Option<Self>;

    /// Preceding named sibling.
    fn previous_named_sibling(&self) -> Option<Self>;

    /// Strict descendants whose grammar type is `kind`, in document order.
    fn descendants_of_type(&self, kind: &str) -> Vec<Self>;

    /// Whether this node is itself a parse error.
    fn is_error(&self) -> bool;

    /// Whether this node or any descendant is a parse error or missing node.
    fn has_error(&self) -> bool;

    /// First child, named or anonymous.
    fn first_child(&self) -> Option<Self> {
        self.child(0)
    }

    /// Last child, named or anonymous.
    fn last_child(&self) -> Option<Self> {
        self.child_count()
            .checked_sub(1)
            .and_then(|index| self.child(index))
    }

    /// The node's own extent as a range.
    fn extent(&self) -> TextRange {
        TextRange::new(
            self.start_position(),
            self.end_position(),
            self.start_index(),
            self.end_index(),
        )
    }

    /// Iterates over the node's ancestors, nearest first.
    fn ancestors(&self) -> Ancestors<Self> {
        Ancestors {
            next: self.parent(),
        }
    }
}

/// Iterator over a node's ancestors, created by [`SyntaxNode::ancestors`].
#[derive(Debug)]
pub struct Ancestors<N> {
    next: Option<N>,
}

impl<N: SyntaxNode> Iterator for Ancestors<N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent();
        Some(current)
    }
}
