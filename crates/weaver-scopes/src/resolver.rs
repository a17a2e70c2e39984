//! The resolver: turns captures into scope boundaries.
//!
//! For each capture the resolver interpolates the scope name, resolves the
//! covered range through the capture's adjustments, runs its predicates
//! against whatever an earlier capture recorded for that exact range, records
//! the capture's properties, and finally registers an open boundary at the
//! range start and a close boundary at its end.
//!
//! Accumulated state lives in a [`ResolutionPass`]. Resetting the resolver
//! swaps in a fresh pass; the compiled pattern cache survives resets.

use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::adjust::resolve_range;
use crate::boundary::{Boundaries, BoundaryMap, Placement};
use crate::buffer::TextBuffer;
use crate::capture::{Capture, Properties};
use crate::config::ResolverConfig;
use crate::error::ScopeError;
use crate::metadata::RangeMetadata;
use crate::node::SyntaxNode;
use crate::pattern_cache::PatternCache;
use crate::position::{Position, TextRange, is_valid_range};
use crate::predicate::{FINAL_KEY, first_failure};

pub(crate) const RESOLVER_TARGET: &str = "weaver_scopes::resolver";

/// The processing layer a capture belongs to.
#[derive(Clone, Copy)]
pub struct LayerContext<'a> {
    buffer: &'a dyn TextBuffer,
    depth: usize,
}

impl<'a> LayerContext<'a> {
    /// Creates a context for a layer nested `depth` injections deep.
    #[must_use]
    pub const fn new(buffer: &'a dyn TextBuffer, depth: usize) -> Self {
        Self { buffer, depth }
    }

    /// Creates a context for the top-level layer.
    #[must_use]
    pub const fn root(buffer: &'a dyn TextBuffer) -> Self {
        Self::new(buffer, 0)
    }

    /// Returns the injection depth; zero for the top-level layer.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the layer's buffer.
    #[must_use]
    pub const fn buffer(&self) -> &'a dyn TextBuffer {
        self.buffer
    }
}

impl fmt::Debug for LayerContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerContext")
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

/// Resolver facilities lent to adjustments and predicates.
pub(crate) struct Services<'a> {
    pub(crate) buffer: &'a dyn TextBuffer,
    pub(crate) depth: usize,
    pub(crate) patterns: &'a mut PatternCache,
    pub(crate) metadata: &'a RangeMetadata,
}

/// State accumulated over one pass of captures.
#[derive(Debug)]
pub struct ResolutionPass<Id> {
    boundaries: BoundaryMap<Id>,
    metadata: RangeMetadata,
}

impl<Id> Default for ResolutionPass<Id> {
    fn default() -> Self {
        Self {
            boundaries: BoundaryMap::new(),
            metadata: RangeMetadata::new(),
        }
    }
}

impl<Id> ResolutionPass<Id> {
    /// Returns the boundaries registered during the pass.
    #[must_use]
    pub const fn boundaries(&self) -> &BoundaryMap<Id> {
        &self.boundaries
    }

    /// Returns the range metadata recorded during the pass.
    #[must_use]
    pub const fn metadata(&self) -> &RangeMetadata {
        &self.metadata
    }

    /// Splits the pass into its boundary map and metadata.
    #[must_use]
    pub fn into_parts(self) -> (BoundaryMap<Id>, RangeMetadata) {
        (self.boundaries, self.metadata)
    }
}

type NameToId<Id> = Box<dyn FnMut(&str) -> Id>;

/// Resolves captures for one processing layer.
///
/// A resolver is owned by a single layer and reused across passes. Injected
/// layers use their own resolver so that range metadata never leaks between
/// grammars.
pub struct ScopeResolver<Id = String> {
    config: ResolverConfig,
    name_to_id: NameToId<Id>,
    patterns: PatternCache,
    pass: ResolutionPass<Id>,
}

impl ScopeResolver<String> {
    /// Creates a resolver whose scope identifiers are the scope names.
    #[must_use]
    pub fn new() -> Self {
        Self::with_name_resolver(str::to_owned)
    }
}

impl Default for ScopeResolver<String> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Clone> ScopeResolver<Id> {
    /// Creates a resolver mapping scope names through `name_to_id`.
    ///
    /// The function must return the same identifier for the same name.
    #[must_use]
    pub fn with_name_resolver(name_to_id: impl FnMut(&str) -> Id + 'static) -> Self {
        Self {
            config: ResolverConfig::default(),
            name_to_id: Box::new(name_to_id),
            patterns: PatternCache::new(),
            pass: ResolutionPass::default(),
        }
    }

    /// Replaces the reserved-name configuration.
    #[must_use]
    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the reserved-name configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolves one capture and records its boundaries.
    ///
    /// Returns `Ok(true)` when the capture claimed its range and `Ok(false)`
    /// when it was dropped: an adjustment declined it, its range is empty or
    /// reversed, or one of its predicates failed.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::AdjustmentOutOfBounds`] when a position-based
    /// adjustment leaves the captured node, and
    /// [`ScopeError::InvalidPattern`] or [`ScopeError::InvalidDescriptor`]
    /// when a directive value is malformed.
    pub fn store<N: SyntaxNode>(
        &mut self,
        capture: &Capture<N>,
        layer: &LayerContext<'_>,
    ) -> Result<bool, ScopeError> {
        let name = capture.resolved_name(&self.config);

        let mut services = Services {
            buffer: layer.buffer,
            depth: layer.depth,
            patterns: &mut self.patterns,
            metadata: &self.pass.metadata,
        };

        let range = match resolve_range(capture, &mut services) {
            Ok(Some(range)) if is_valid_range(&range) => range,
            Ok(Some(range)) => {
                trace!(
                    target: RESOLVER_TARGET,
                    scope = name.as_str(),
                    start = %range.start_position,
                    end = %range.end_position,
                    "dropping capture with empty or reversed range"
                );
                return Ok(false);
            }
            Ok(None) => return Ok(false),
            Err(err) => {
                debug!(
                    target: RESOLVER_TARGET,
                    scope = name.as_str(),
                    error = %err,
                    "capture directives are malformed"
                );
                return Err(err);
            }
        };

        let existing = services.metadata.lookup(&range);
        if existing.is_some_and(|data| data.contains_key(FINAL_KEY)) {
            trace!(
                target: RESOLVER_TARGET,
                scope = name.as_str(),
                "range already claimed by a final capture"
            );
            return Ok(false);
        }
        if let Some(predicate) =
            first_failure(&capture.node, &capture.properties, existing, &services)?
        {
            trace!(
                target: RESOLVER_TARGET,
                scope = name.as_str(),
                predicate = predicate.key(),
                "predicate rejected capture"
            );
            return Ok(false);
        }

        self.pass.metadata.record(&range, capture.properties.clone());
        if name == self.config.ignore_scope {
            return Ok(true);
        }

        self.register(&name, &range, Placement::Nested);
        Ok(true)
    }

    /// Registers a synthetic outermost scope over `range`.
    ///
    /// Root scopes open before and close after every other scope sharing
    /// their boundary positions, whatever order they arrive in. They bypass
    /// directives and predicates and record no metadata. Returns `false` for
    /// an empty or reversed range.
    pub fn store_root_scope(&mut self, name: &str, range: &TextRange) -> bool {
        if !is_valid_range(range) {
            return false;
        }
        self.register(name, range, Placement::Root);
        true
    }

    fn register(&mut self, name: &str, range: &TextRange, placement: Placement) {
        let id = (self.name_to_id)(name);
        self.pass
            .boundaries
            .open(range.start_position, id.clone(), placement);
        self.pass.boundaries.close(range.end_position, id, placement);
    }

    /// Returns the properties recorded for the exact range.
    #[must_use]
    pub fn metadata_for(&self, range: &TextRange) -> Option<&Properties> {
        self.pass.metadata.lookup(range)
    }

    /// Returns the boundaries accumulated so far.
    #[must_use]
    pub const fn boundary_map(&self) -> &BoundaryMap<Id> {
        &self.pass.boundaries
    }

    /// Iterates over `(position, boundaries)` pairs in unspecified order.
    pub fn boundaries(&self) -> impl Iterator<Item = (Position, &Boundaries<Id>)> {
        self.pass.boundaries.iter()
    }

    /// Returns the compiled pattern cache.
    #[must_use]
    pub const fn patterns(&self) -> &PatternCache {
        &self.patterns
    }

    /// Discards boundaries and metadata, keeping compiled patterns.
    pub fn reset(&mut self) {
        debug!(
            target: RESOLVER_TARGET,
            positions = self.pass.boundaries.len(),
            ranges = self.pass.metadata.len(),
            "resetting resolver"
        );
        self.pass = ResolutionPass::default();
    }

    /// Hands over the current pass and starts a fresh one.
    #[must_use]
    pub fn finish(&mut self) -> ResolutionPass<Id> {
        mem::take(&mut self.pass)
    }
}

impl<Id> fmt::Debug for ScopeResolver<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeResolver")
            .field("config", &self.config)
            .field("patterns", &self.patterns.len())
            .field("positions", &self.pass.boundaries.len())
            .field("ranges", &self.pass.metadata.len())
            .finish_non_exhaustive()
    }
}
