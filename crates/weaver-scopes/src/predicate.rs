//! Inclusion predicates: directives that decide whether a capture counts.
//!
//! Every predicate key present on a capture must pass. Keys that are absent
//! impose nothing.

use crate::capture::Properties;
use crate::descriptor::NodeDescriptor;
use crate::error::ScopeError;
use crate::node::SyntaxNode;
use crate::resolver::Services;

/// Metadata key that locks a range against later captures.
pub const FINAL_KEY: &str = "final";

/// The recognised inclusion predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// No earlier capture marked this exact range final.
    Final,
    /// No earlier capture recorded anything for this exact range.
    Shy,
    /// The node is a parse error.
    OnlyIfError,
    /// The node's subtree contains a parse error.
    OnlyIfHasError,
    /// The owning layer is an injection.
    OnlyIfInjection,
    /// The node has no parent.
    OnlyIfRoot,
    /// The node is its parent's first child.
    OnlyIfFirst,
    /// The node is not its parent's first child.
    OnlyIfNotFirst,
    /// The node is its parent's last child.
    OnlyIfLast,
    /// The node is not its parent's last child.
    OnlyIfNotLast,
    /// The node is the first sibling of its own type.
    OnlyIfFirstOfType,
    /// The node is the last sibling of its own type.
    OnlyIfLastOfType,
    /// Only whitespace follows the node on its end row.
    OnlyIfLastTextOnRow,
    /// Non-whitespace text follows the node on its end row.
    OnlyIfNotLastTextOnRow,
    /// Some ancestor has one of the listed types.
    OnlyIfDescendantOfType,
    /// No ancestor has any of the listed types.
    OnlyIfNotDescendantOfType,
    /// Some descendant has one of the listed types.
    OnlyIfAncestorOfType,
    /// No descendant has any of the listed types.
    OnlyIfNotAncestorOfType,
    /// Some ancestor's range carries the given metadata key.
    OnlyIfDescendantOfNodeWithData,
    /// No ancestor's range carries the given metadata key.
    OnlyIfNotDescendantOfNodeWithData,
    /// The node starts on the row of a described position.
    OnlyIfOnSameRowAs,
    /// The node does not start on the row of a described position.
    OnlyIfNotOnSameRowAs,
}

impl Predicate {
    /// Every predicate, in registration order.
    pub const ALL: [Self; 22] = [
        Self::Final,
        Self::Shy,
        Self::OnlyIfError,
        Self::OnlyIfHasError,
        Self::OnlyIfInjection,
        Self::OnlyIfRoot,
        Self::OnlyIfFirst,
        Self::OnlyIfNotFirst,
        Self::OnlyIfLast,
        Self::OnlyIfNotLast,
        Self::OnlyIfFirstOfType,
        Self::OnlyIfLastOfType,
        Self::OnlyIfLastTextOnRow,
        Self::OnlyIfNotLastTextOnRow,
        Self::OnlyIfDescendantOfType,
        Self::OnlyIfNotDescendantOfType,
        Self::OnlyIfAncestorOfType,
        Self::OnlyIfNotAncestorOfType,
        Self::OnlyIfDescendantOfNodeWithData,
        Self::OnlyIfNotDescendantOfNodeWithData,
        Self::OnlyIfOnSameRowAs,
        Self::OnlyIfNotOnSameRowAs,
    ];

    /// Returns the directive key for this predicate.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Final => FINAL_KEY,
            Self::Shy => "shy",
            Self::OnlyIfError => "onlyIfError",
            Self::OnlyIfHasError => "onlyIfHasError",
            Self::OnlyIfInjection => "onlyIfInjection",
            Self::OnlyIfRoot => "onlyIfRoot",
            Self::OnlyIfFirst => "onlyIfFirst",
            Self::OnlyIfNotFirst => "onlyIfNotFirst",
            Self::OnlyIfLast => "onlyIfLast",
            Self::OnlyIfNotLast => "onlyIfNotLast",
            Self::OnlyIfFirstOfType => "onlyIfFirstOfType",
            Self::OnlyIfLastOfType => "onlyIfLastOfType",
            Self::OnlyIfLastTextOnRow => "onlyIfLastTextOnRow",
            Self::OnlyIfNotLastTextOnRow => "onlyIfNotLastTextOnRow",
            Self::OnlyIfDescendantOfType => "onlyIfDescendantOfType",
            Self::OnlyIfNotDescendantOfType => "onlyIfNotDescendantOfType",
            Self::OnlyIfAncestorOfType => "onlyIfAncestorOfType",
            Self::OnlyIfNotAncestorOfType => "onlyIfNotAncestorOfType",
            Self::OnlyIfDescendantOfNodeWithData => "onlyIfDescendantOfNodeWithData",
            Self::OnlyIfNotDescendantOfNodeWithData => "onlyIfNotDescendantOfNodeWithData",
            Self::OnlyIfOnSameRowAs => "onlyIfOnSameRowAs",
            Self::OnlyIfNotOnSameRowAs => "onlyIfNotOnSameRowAs",
        }
    }

    /// Looks up the predicate registered under `key`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|predicate| predicate.key() == key)
    }

    /// Evaluates the predicate for a capture.
    ///
    /// `existing` is whatever an earlier capture recorded for the same
    /// resolved range.
    pub(crate) fn evaluate<N: SyntaxNode>(
        self,
        node: &N,
        value: &str,
        existing: Option<&Properties>,
        services: &Services<'_>,
    ) -> Result<bool, ScopeError> {
        let passed = match self {
            Self::Final => existing.is_none_or(|data| !data.contains_key(FINAL_KEY)),
            Self::Shy => existing.is_none(),
            Self::OnlyIfError => node.is_error(),
            Self::OnlyIfHasError => node.has_error(),
            Self::OnlyIfInjection => services.depth > 0,
            Self::OnlyIfRoot => node.parent().is_none(),
            Self::OnlyIfFirst => is_first(node),
            Self::OnlyIfNotFirst => !is_first(node),
            Self::OnlyIfLast => is_last(node),
            Self::OnlyIfNotLast => !is_last(node),
            Self::OnlyIfFirstOfType => is_first_of_type(node),
            Self::OnlyIfLastOfType => is_last_of_type(node),
            Self::OnlyIfLastTextOnRow => is_last_text_on_row(node, services),
            Self::OnlyIfNotLastTextOnRow => !is_last_text_on_row(node, services),
            Self::OnlyIfDescendantOfType => has_ancestor_of_type(node, value),
            Self::OnlyIfNotDescendantOfType => !has_ancestor_of_type(node, value),
            Self::OnlyIfAncestorOfType => has_descendant_of_type(node, value),
            Self::OnlyIfNotAncestorOfType => !has_descendant_of_type(node, value),
            Self::OnlyIfDescendantOfNodeWithData => has_ancestor_with_data(node, value, services),
            Self::OnlyIfNotDescendantOfNodeWithData => {
                !has_ancestor_with_data(node, value, services)
            }
            Self::OnlyIfOnSameRowAs => same_row_as(node, value)? == Some(true),
            Self::OnlyIfNotOnSameRowAs => same_row_as(node, value)? == Some(false),
        };
        Ok(passed)
    }
}

/// Returns the first predicate on `properties` that rejects the capture.
pub(crate) fn first_failure<N: SyntaxNode>(
    node: &N,
    properties: &Properties,
    existing: Option<&Properties>,
    services: &Services<'_>,
) -> Result<Option<Predicate>, ScopeError> {
    for (key, value) in properties {
        let Some(predicate) = Predicate::from_key(key) else {
            continue;
        };
        if !predicate.evaluate(node, value, existing, services)? {
            return Ok(Some(predicate));
        }
    }
    Ok(None)
}

fn is_first<N: SyntaxNode>(node: &N) -> bool {
    node.parent()
        .is_none_or(|parent| parent.first_child().is_some_and(|c| c.id() == node.id()))
}

fn is_last<N: SyntaxNode>(node: &N) -> bool {
    node.parent()
        .is_none_or(|parent| parent.last_child().is_some_and(|c| c.id() == node.id()))
}

fn is_first_of_type<N: SyntaxNode>(node: &N) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    (0..parent.child_count())
        .filter_map(|index| parent.child(index))
        .find(|sibling| sibling.kind() == node.kind())
        .is_none_or(|sibling| sibling.id() == node.id())
}

fn is_last_of_type<N: SyntaxNode>(node: &N) -> bool {
    let Some(parent) = node.parent() else {
        return true;
    };
    (0..parent.child_count())
        .rev()
        .filter_map(|index| parent.child(index))
        .find(|sibling| sibling.kind() == node.kind())
        .is_none_or(|sibling| sibling.id() == node.id())
}

fn is_last_text_on_row<N: SyntaxNode>(node: &N, services: &Services<'_>) -> bool {
    let end = node.end_position();
    let Some(line) = services.buffer.line_for_row(end.row) else {
        return true;
    };
    line.get(end.column..)
        .is_none_or(|rest| rest.chars().all(char::is_whitespace))
}

fn has_ancestor_of_type<N: SyntaxNode>(node: &N, types: &str) -> bool {
    node.ancestors()
        .any(|ancestor| types.split_whitespace().any(|kind| ancestor.kind() == kind))
}

fn has_descendant_of_type<N: SyntaxNode>(node: &N, types: &str) -> bool {
    types
        .split_whitespace()
        .any(|kind| !node.descendants_of_type(kind).is_empty())
}

fn has_ancestor_with_data<N: SyntaxNode>(node: &N, key: &str, services: &Services<'_>) -> bool {
    node.ancestors().any(|ancestor| {
        services
            .metadata
            .lookup(&ancestor.extent())
            .is_some_and(|data| data.contains_key(key))
    })
}

/// Compares the node's start row with a described position's row.
///
/// `None` when the descriptor walks off the tree.
fn same_row_as<N: SyntaxNode>(node: &N, descriptor: &str) -> Result<Option<bool>, ScopeError> {
    let parsed: NodeDescriptor = descriptor.parse()?;
    Ok(parsed
        .resolve(node)
        .map(|position| position.row == node.start_position().row))
}
