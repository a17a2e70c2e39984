//! Error types for scope resolution.
//!
//! Only authoring defects in a grammar's highlighting rules surface as
//! errors. Captures that simply do not apply (a regex without a match, a
//! failed predicate, a degenerate range) are dropped and reported through the
//! `false` return of [`crate::ScopeResolver::store`] instead.

use thiserror::Error;

use crate::position::Position;

/// Errors from resolving a capture into scope boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScopeError {
    /// A position-based adjustment moved the range outside its node.
    #[error(
        "{directive} resolved to {position}, outside the capture node ({node_start} to {node_end})"
    )]
    AdjustmentOutOfBounds {
        /// The directive key that produced the position.
        directive: &'static str,
        /// The offending position.
        position: Position,
        /// Start of the capture node's own extent.
        node_start: Position,
        /// End of the capture node's own extent.
        node_end: Position,
    },

    /// A match-based directive carried a pattern that does not compile.
    #[error("invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern source as written in the directive.
        pattern: String,
        /// The underlying compilation failure.
        #[source]
        source: regex::Error,
    },

    /// A node descriptor could not be parsed.
    #[error("invalid node descriptor {descriptor:?}: {message}")]
    InvalidDescriptor {
        /// The descriptor as written in the directive.
        descriptor: String,
        /// Description of the problem.
        message: String,
    },
}

impl ScopeError {
    /// Creates an out-of-bounds adjustment error.
    #[must_use]
    pub const fn out_of_bounds(
        directive: &'static str,
        position: Position,
        node_start: Position,
        node_end: Position,
    ) -> Self {
        Self::AdjustmentOutOfBounds {
            directive,
            position,
            node_start,
            node_end,
        }
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates an invalid descriptor error.
    #[must_use]
    pub fn invalid_descriptor(descriptor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            descriptor: descriptor.into(),
            message: message.into(),
        }
    }
}
