//! Dotted node descriptors such as `firstChild.nextSibling.endPosition`.
//!
//! A descriptor walks from a capture's node through zero or more navigation
//! steps and ends in a position terminal. Directives use them to name a
//! position relative to the captured node.

use std::str::FromStr;

use crate::error::ScopeError;
use crate::node::SyntaxNode;
use crate::position::Position;

/// One navigation step of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStep {
    /// `parent`
    Parent,
    /// `firstChild`
    FirstChild,
    /// `lastChild`
    LastChild,
    /// `firstNamedChild`
    FirstNamedChild,
    /// `lastNamedChild`
    LastNamedChild,
    /// `nextSibling`
    NextSibling,
    /// `previousSibling`
    PreviousSibling,
    /// `nextNamedSibling`
    NextNamedSibling,
    /// `previousNamedSibling`
    PreviousNamedSibling,
}

impl NodeStep {
    const ALL: [Self; 9] = [
        Self::Parent,
        Self::FirstChild,
        Self::LastChild,
        Self::FirstNamedChild,
        Self::LastNamedChild,
        Self::NextSibling,
        Self::PreviousSibling,
        Self::NextNamedSibling,
        Self::PreviousNamedSibling,
    ];

    /// Returns the name of the step as written in a descriptor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::FirstChild => "firstChild",
            Self::LastChild => "lastChild",
            Self::FirstNamedChild => "firstNamedChild",
            Self::LastNamedChild => "lastNamedChild",
            Self::NextSibling => "nextSibling",
            Self::PreviousSibling => "previousSibling",
            Self::NextNamedSibling => "nextNamedSibling",
            Self::PreviousNamedSibling => "previousNamedSibling",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.name() == name)
    }

    fn follow<N: SyntaxNode>(self, node: &N) -> Option<N> {
        match self {
            Self::Parent => node.parent(),
            Self::FirstChild => node.first_child(),
            Self::LastChild => node.last_child(),
            Self::FirstNamedChild => node.first_named_child(),
            Self::LastNamedChild => node.last_named_child(),
            Self::NextSibling => node.next_sibling(),
            Self::PreviousSibling => node.previous_sibling(),
            Self::NextNamedSibling => node.next_named_sibling(),
            Self::PreviousNamedSibling => node.previous_named_sibling(),
        }
    }
}

/// Which end of the resolved node a descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// `startPosition`
    Start,
    /// `endPosition`
    End,
}

/// A parsed descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    steps: Vec<NodeStep>,
    anchor: Anchor,
}

impl NodeDescriptor {
    /// Returns the navigation steps in order.
    #[must_use]
    pub fn steps(&self) -> &[NodeStep] {
        &self.steps
    }

    /// Returns the position terminal.
    #[must_use]
    pub const fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Resolves the descriptor against `node`.
    ///
    /// Returns `None` when a step walks off the tree.
    #[must_use]
    pub fn resolve<N: SyntaxNode>(&self, node: &N) -> Option<Position> {
        let Some((first, rest)) = self.steps.split_first() else {
            return Some(anchor_position(node, self.anchor));
        };
        let target = rest
            .iter()
            .try_fold(first.follow(node)?, |current, step| step.follow(&current))?;
        Some(anchor_position(&target, self.anchor))
    }
}

fn anchor_position<N: SyntaxNode>(node: &N, anchor: Anchor) -> Position {
    match anchor {
        Anchor::Start => node.start_position(),
        Anchor::End => node.end_position(),
    }
}

impl FromStr for NodeDescriptor {
    type Err = ScopeError;

    fn from_str(descriptor: &str) -> Result<Self, Self::Err> {
        let trimmed = descriptor.trim();
        let (path, terminal) = match trimmed.rsplit_once('.') {
            Some((path, terminal)) => (Some(path), terminal),
            None => (None, trimmed),
        };

        let anchor = match terminal {
            "startPosition" => Anchor::Start,
            "endPosition" => Anchor::End,
            other => {
                return Err(ScopeError::invalid_descriptor(
                    descriptor,
                    format!("expected startPosition or endPosition, found {other:?}"),
                ));
            }
        };

        let steps = path
            .into_iter()
            .flat_map(|p| p.split('.'))
            .map(|name| {
                NodeStep::from_name(name).ok_or_else(|| {
                    ScopeError::invalid_descriptor(descriptor, format!("unknown step {name:?}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { steps, anchor })
    }
}
