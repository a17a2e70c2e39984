//! Per-range properties recorded by accepted captures.
//!
//! The store writes unconditionally. First-claim semantics come from the
//! `final` and `shy` predicates, which consult the store before a capture is
//! allowed to record.

use std::collections::HashMap;

use crate::capture::Properties;
use crate::position::{RangeKey, TextRange};

/// Properties keyed by exact range.
#[derive(Debug, Clone, Default)]
pub struct RangeMetadata {
    entries: HashMap<RangeKey, Properties>,
}

impl RangeMetadata {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `properties` for the exact range, replacing any earlier entry.
    pub fn record(&mut self, range: &TextRange, properties: Properties) {
        self.entries.insert(range.key(), properties);
    }

    /// Returns the properties recorded for the exact range.
    #[must_use]
    pub fn lookup(&self, range: &TextRange) -> Option<&Properties> {
        self.get(range.key())
    }

    /// Returns the properties recorded under `key`.
    #[must_use]
    pub fn get(&self, key: RangeKey) -> Option<&Properties> {
        self.entries.get(&key)
    }

    /// Returns the number of ranges with recorded properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
