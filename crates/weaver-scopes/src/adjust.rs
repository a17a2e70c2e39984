//! Range adjustments: directives that narrow or shift a capture's range.
//!
//! Adjustments run in the order their keys appear on the capture. Each one
//! sees the range produced by the previous one and either returns a new
//! range or declares that the capture does not apply.
//!
//! Position-based adjustments that land outside the captured node are
//! authoring defects and fail hard. Match-based adjustments without a match,
//! and offsets that are not integers, drop the capture quietly.

use tracing::trace;

use crate::capture::Capture;
use crate::descriptor::NodeDescriptor;
use crate::error::ScopeError;
use crate::node::SyntaxNode;
use crate::position::{Position, TextRange, is_between_points};
use crate::resolver::{RESOLVER_TARGET, Services};

/// The recognised range adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    /// Move the start to a position named by a node descriptor.
    StartAt,
    /// Move the end to a position named by a node descriptor.
    EndAt,
    /// Shift the start by a signed number of characters.
    OffsetStart,
    /// Shift the end by a signed number of characters.
    OffsetEnd,
    /// Narrow the range to the first match of a pattern in the node text.
    StartAndEndAroundFirstMatchOf,
    /// Move the start to the beginning of the first match.
    StartBeforeFirstMatchOf,
    /// Move the start to the end of the first match.
    StartAfterFirstMatchOf,
    /// Move the end to the beginning of the first match.
    EndBeforeFirstMatchOf,
    /// Move the end to the end of the first match.
    EndAfterFirstMatchOf,
}

/// Which end of a range an adjustment rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

impl Adjustment {
    /// Every adjustment, in registration order.
    pub const ALL: [Self; 9] = [
        Self::StartAt,
        Self::EndAt,
        Self::OffsetStart,
        Self::OffsetEnd,
        Self::StartAndEndAroundFirstMatchOf,
        Self::StartBeforeFirstMatchOf,
        Self::StartAfterFirstMatchOf,
        Self::EndBeforeFirstMatchOf,
        Self::EndAfterFirstMatchOf,
    ];

    /// Returns the directive key for this adjustment.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::StartAt => "startAt",
            Self::EndAt => "endAt",
            Self::OffsetStart => "offsetStart",
            Self::OffsetEnd => "offsetEnd",
            Self::StartAndEndAroundFirstMatchOf => "startAndEndAroundFirstMatchOf",
            Self::StartBeforeFirstMatchOf => "startBeforeFirstMatchOf",
            Self::StartAfterFirstMatchOf => "startAfterFirstMatchOf",
            Self::EndBeforeFirstMatchOf => "endBeforeFirstMatchOf",
            Self::EndAfterFirstMatchOf => "endAfterFirstMatchOf",
        }
    }

    /// Looks up the adjustment registered under `key`.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|adjustment| adjustment.key() == key)
    }

    /// Applies the adjustment to `range`.
    ///
    /// `Ok(None)` means the capture does not apply here.
    pub(crate) fn apply<N: SyntaxNode>(
        self,
        node: &N,
        value: &str,
        range: TextRange,
        services: &mut Services<'_>,
    ) -> Result<Option<TextRange>, ScopeError> {
        match self {
            Self::StartAt => at_descriptor(self, node, value, range, services, Edge::Start),
            Self::EndAt => at_descriptor(self, node, value, range, services, Edge::End),
            Self::OffsetStart => offset(self, node, value, range, services, Edge::Start),
            Self::OffsetEnd => offset(self, node, value, range, services, Edge::End),
            Self::StartAndEndAroundFirstMatchOf => {
                let Some((start, end)) = first_match(self, node, value, services)? else {
                    return Ok(None);
                };
                let with_start = with_edge(range, Edge::Start, start, services);
                Ok(Some(with_edge(with_start, Edge::End, end, services)))
            }
            Self::StartBeforeFirstMatchOf => Ok(first_match(self, node, value, services)?
                .map(|(start, _)| with_edge(range, Edge::Start, start, services))),
            Self::StartAfterFirstMatchOf => Ok(first_match(self, node, value, services)?
                .map(|(_, end)| with_edge(range, Edge::Start, end, services))),
            Self::EndBeforeFirstMatchOf => Ok(first_match(self, node, value, services)?
                .map(|(start, _)| with_edge(range, Edge::End, start, services))),
            Self::EndAfterFirstMatchOf => Ok(first_match(self, node, value, services)?
                .map(|(_, end)| with_edge(range, Edge::End, end, services))),
        }
    }
}

/// Resolves the range a capture covers after all of its adjustments.
///
/// Captures without adjustments cover their node's own extent. `Ok(None)`
/// means an adjustment declined the capture.
pub(crate) fn resolve_range<N: SyntaxNode>(
    capture: &Capture<N>,
    services: &mut Services<'_>,
) -> Result<Option<TextRange>, ScopeError> {
    let mut range = capture.node.extent();
    for (key, value) in &capture.properties {
        let Some(adjustment) = Adjustment::from_key(key) else {
            continue;
        };
        match adjustment.apply(&capture.node, value, range, services)? {
            Some(adjusted) => range = adjusted,
            None => {
                trace!(
                    target: RESOLVER_TARGET,
                    directive = adjustment.key(),
                    value = value.as_str(),
                    "adjustment declined capture"
                );
                return Ok(None);
            }
        }
    }
    Ok(Some(range))
}

fn with_edge(range: TextRange, edge: Edge, index: usize, services: &Services<'_>) -> TextRange {
    let position = services.buffer.position_for_index(index);
    match edge {
        Edge::Start => TextRange {
            start_position: position,
            start_index: index,
            ..range
        },
        Edge::End => TextRange {
            end_position: position,
            end_index: index,
            ..range
        },
    }
}

fn with_position(
    range: TextRange,
    edge: Edge,
    position: Position,
    services: &Services<'_>,
) -> TextRange {
    let index = services.buffer.index_for_position(position);
    match edge {
        Edge::Start => TextRange {
            start_position: position,
            start_index: index,
            ..range
        },
        Edge::End => TextRange {
            end_position: position,
            end_index: index,
            ..range
        },
    }
}

fn ensure_within_node<N: SyntaxNode>(
    adjustment: Adjustment,
    node: &N,
    position: Position,
) -> Result<(), ScopeError> {
    let (start, end) = (node.start_position(), node.end_position());
    if is_between_points(position, start, end) {
        Ok(())
    } else {
        Err(ScopeError::out_of_bounds(
            adjustment.key(),
            position,
            start,
            end,
        ))
    }
}

fn at_descriptor<N: SyntaxNode>(
    adjustment: Adjustment,
    node: &N,
    value: &str,
    range: TextRange,
    services: &Services<'_>,
    edge: Edge,
) -> Result<Option<TextRange>, ScopeError> {
    let descriptor: NodeDescriptor = value.parse()?;
    let Some(position) = descriptor.resolve(node) else {
        return Ok(None);
    };
    ensure_within_node(adjustment, node, position)?;
    Ok(Some(with_position(range, edge, position, services)))
}

fn offset<N: SyntaxNode>(
    adjustment: Adjustment,
    node: &N,
    value: &str,
    range: TextRange,
    services: &Services<'_>,
    edge: Edge,
) -> Result<Option<TextRange>, ScopeError> {
    let Ok(delta) = value.trim().parse::<isize>() else {
        return Ok(None);
    };
    let current = match edge {
        Edge::Start => range.start_index,
        Edge::End => range.end_index,
    };
    let shifted = services.buffer.offset_index(current, delta);
    let position = services
        .buffer
        .clip_position(services.buffer.position_for_index(shifted));
    ensure_within_node(adjustment, node, position)?;
    Ok(Some(with_position(range, edge, position, services)))
}

/// Returns the buffer indices of the first match of `pattern` in the node.
fn first_match<N: SyntaxNode>(
    adjustment: Adjustment,
    node: &N,
    pattern: &str,
    services: &mut Services<'_>,
) -> Result<Option<(usize, usize)>, ScopeError> {
    let regex = services.patterns.compile(pattern)?;
    let found = regex.find(node.text()).map(|found| {
        let base = node.start_index();
        (
            base.saturating_add(found.start()),
            base.saturating_add(found.end()),
        )
    });
    if found.is_none() {
        trace!(
            target: RESOLVER_TARGET,
            directive = adjustment.key(),
            pattern,
            "pattern did not match node text"
        );
    }
    Ok(found)
}
