//! Scope resolution for Tree-sitter powered highlighting in the Weaver
//! toolchain.
//!
//! Grammar queries produce *captures*: a syntax node, a scope name and a set
//! of directive properties. This crate turns a stream of captures into scope
//! boundaries anchored at buffer positions, ready for a highlighter to walk
//! in order.
//!
//! - **Adjustments** ([`Adjustment`]) let a capture narrow or shift the range
//!   it covers, for example `startAt: firstChild.endPosition` or
//!   `endBeforeFirstMatchOf: \s*$`.
//! - **Predicates** ([`Predicate`]) gate whether a capture counts at all,
//!   for example `onlyIfFirst` or `onlyIfDescendantOfType: call_expression`.
//! - **Range metadata** lets the first capture that claims a range shut
//!   others out, through `final` and `shy`.
//! - **Boundaries** ([`BoundaryMap`]) keep same-position scopes properly
//!   nested: later captures open inside earlier ones and close first.
//!
//! The crate does not parse source text, decide styling, or order positions;
//! the host feeds captures in and sorts the resulting boundary positions.
//!
//! # Directives in queries
//!
//! Directives are written as `#set!` properties on query patterns:
//!
//! ```text
//! ((function_item name: (identifier) @entity.name.function)
//!   (#set! final true))
//! ((string_literal) @punctuation.definition.string.begin
//!   (#set! endAt firstChild.endPosition))
//! ```
//!
//! # Example
//!
//! ```ignore
//! use weaver_scopes::{LayerContext, ScopeResolver, SourceBuffer, collect_captures};
//!
//! let buffer = SourceBuffer::new(source);
//! let layer = LayerContext::root(&buffer);
//! let mut resolver = ScopeResolver::new();
//! for capture in collect_captures(&query, tree.root_node(), buffer.text()) {
//!     resolver.store(&capture, &layer)?;
//! }
//! let ordered: std::collections::BTreeMap<_, _> = resolver.boundaries().collect();
//! ```

mod adjust;
mod boundary;
mod buffer;
mod capture;
mod config;
mod descriptor;
mod error;
mod metadata;
mod node;
mod pattern_cache;
mod position;
mod predicate;
mod query;
mod resolver;

pub use adjust::Adjustment;
pub use boundary::{Boundaries, BoundaryMap, Placement};
pub use buffer::{SourceBuffer, TextBuffer};
pub use capture::{Capture, Properties, interpolate_name};
pub use config::{
    DEFAULT_IGNORE_SCOPE, DEFAULT_TEXT_TOKEN, DEFAULT_TYPE_TOKEN, ResolverConfig,
    default_ignore_scope, default_text_token, default_type_token,
};
pub use descriptor::{Anchor, NodeDescriptor, NodeStep};
pub use error::ScopeError;
pub use metadata::RangeMetadata;
pub use node::{Ancestors, NodeId, SyntaxNode, TsNode};
pub use pattern_cache::PatternCache;
pub use position::{
    Position, RangeKey, TextRange, compare_points, is_between_points, is_valid_range,
};
pub use predicate::{FINAL_KEY, Predicate};
pub use query::{captures_for_match, collect_captures};
pub use resolver::{LayerContext, ResolutionPass, ScopeResolver};

#[cfg(test)]
mod tests;
