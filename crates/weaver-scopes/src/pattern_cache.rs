//! Memoised regular expressions for match-based directives.

use std::collections::HashMap;
use std::rc::Rc;

use regex::Regex;
use tracing::debug;

use crate::error::ScopeError;

const CACHE_TARGET: &str = "weaver_scopes::pattern_cache";

/// Compiled patterns keyed by their exact source string.
///
/// Entries live as long as the cache; resetting a resolver keeps them so
/// that repeated passes over the same grammar do not recompile.
#[derive(Debug, Default)]
pub struct PatternCache {
    patterns: HashMap<String, Rc<Regex>>,
}

impl PatternCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the compiled form of `pattern`, compiling it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`ScopeError::InvalidPattern`] if the pattern does not
    /// compile. Failures are not cached.
    pub fn compile(&mut self, pattern: &str) -> Result<Rc<Regex>, ScopeError> {
        if let Some(compiled) = self.patterns.get(pattern) {
            return Ok(Rc::clone(compiled));
        }

        let compiled = Rc::new(
            Regex::new(pattern).map_err(|err| ScopeError::invalid_pattern(pattern, err))?,
        );
        debug!(target: CACHE_TARGET, pattern, "compiled directive pattern");
        self.patterns.insert(pattern.to_owned(), Rc::clone(&compiled));
        Ok(compiled)
    }

    /// Returns whether `pattern` has already been compiled.
    #[must_use]
    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains_key(pattern)
    }

    /// Returns the number of cached patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_each_source_once() {
        let mut cache = PatternCache::new();
        let first = cache.compile(r"\w+").expect("compile");
        let second = cache.compile(r"\w+").expect("compile");

        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn distinct_sources_get_distinct_entries() {
        let mut cache = PatternCache::new();
        cache.compile("a").expect("compile");
        cache.compile("a ").expect("compile");

        assert_eq!(cache.len(), 2);
        assert!(cache.contains("a "));
    }

    #[test]
    fn invalid_patterns_are_reported_and_not_cached() {
        let mut cache = PatternCache::new();
        let result = cache.compile("(unclosed");

        assert!(matches!(result, Err(ScopeError::InvalidPattern { .. })));
        assert!(cache.is_empty());
    }
}
