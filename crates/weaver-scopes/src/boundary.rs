//! Open/close scope boundaries grouped by buffer position.
//!
//! Nested placement appends opens and prepends closes, so captures arriving
//! A, B, C at a shared point open as `[A, B, C]` and close as `[C, B, A]`.
//! Root placement reverses both insertion points, keeping a synthetic
//! outermost scope outside everything else at that point.

use std::collections::HashMap;
use std::collections::hash_map;

use crate::position::Position;

/// Where a boundary lands relative to others at the same position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Placement {
    /// Ordinary capture scope, nested by arrival order.
    #[default]
    Nested,
    /// Outermost scope: opens first and closes last.
    Root,
}

/// Scope boundaries registered at one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundaries<Id> {
    open: Vec<Id>,
    close: Vec<Id>,
}

impl<Id> Default for Boundaries<Id> {
    fn default() -> Self {
        Self {
            open: Vec::new(),
            close: Vec::new(),
        }
    }
}

impl<Id> Boundaries<Id> {
    /// Scopes opening here, outermost first.
    #[must_use]
    pub fn open(&self) -> &[Id] {
        &self.open
    }

    /// Scopes closing here, innermost first.
    #[must_use]
    pub fn close(&self) -> &[Id] {
        &self.close
    }

    fn push_open(&mut self, id: Id, placement: Placement) {
        match placement {
            Placement::Nested => self.open.push(id),
            Placement::Root => self.open.insert(0, id),
        }
    }

    fn push_close(&mut self, id: Id, placement: Placement) {
        match placement {
            Placement::Nested => self.close.insert(0, id),
            Placement::Root => self.close.push(id),
        }
    }
}

/// Boundaries for every position that has any.
///
/// Iteration order is unspecified; consumers order positions themselves.
#[derive(Debug, Clone)]
pub struct BoundaryMap<Id> {
    bundles: HashMap<Position, Boundaries<Id>>,
}

impl<Id> Default for BoundaryMap<Id> {
    fn default() -> Self {
        Self {
            bundles: HashMap::new(),
        }
    }
}

impl<Id> BoundaryMap<Id> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` opening at `position`.
    pub fn open(&mut self, position: Position, id: Id, placement: Placement) {
        self.bundles
            .entry(position)
            .or_default()
            .push_open(id, placement);
    }

    /// Registers `id` closing at `position`.
    pub fn close(&mut self, position: Position, id: Id, placement: Placement) {
        self.bundles
            .entry(position)
            .or_default()
            .push_close(id, placement);
    }

    /// Returns the boundaries registered at `position`.
    #[must_use]
    pub fn get(&self, position: Position) -> Option<&Boundaries<Id>> {
        self.bundles.get(&position)
    }

    /// Iterates over `(position, boundaries)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Boundaries<Id>)> {
        self.bundles.iter().map(|(position, bundle)| (*position, bundle))
    }

    /// Returns the number of positions with boundaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    /// Returns whether no boundaries are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }
}

impl<Id> IntoIterator for BoundaryMap<Id> {
    type Item = (Position, Boundaries<Id>);
    type IntoIter = hash_map::IntoIter<Position, Boundaries<Id>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bundles.into_iter()
    }
}
