//! Captures: a syntax node, a scope name and directive properties.

use indexmap::IndexMap;

use crate::config::ResolverConfig;
use crate::node::SyntaxNode;

/// Directive properties attached to a capture, in declaration order.
///
/// Order matters: range adjustments apply one after another in the order
/// their keys were set.
pub type Properties = IndexMap<String, String>;

/// One grammar-pattern match awaiting resolution.
#[derive(Debug, Clone)]
pub struct Capture<N> {
    /// The captured syntax node.
    pub node: N,
    /// Scope name, possibly containing interpolation tokens.
    pub name: String,
    /// Directive properties set on the capture.
    pub properties: Properties,
}

impl<N: SyntaxNode> Capture<N> {
    /// Creates a capture without directives.
    #[must_use]
    pub fn new(node: N, name: impl Into<String>) -> Self {
        Self {
            node,
            name: name.into(),
            properties: Properties::new(),
        }
    }

    /// Adds a directive, keeping earlier directives ahead of it.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Resolves interpolation tokens in the capture's scope name.
    ///
    /// The text token is only replaced when the node's text contains no
    /// space, since a space cannot appear in a scope name. The type token is
    /// always replaced.
    #[must_use]
    pub fn resolved_name(&self, config: &ResolverConfig) -> String {
        interpolate_name(&self.name, &self.node, config)
    }
}

/// Replaces the text and type tokens of `name` using `node`.
#[must_use]
pub fn interpolate_name<N: SyntaxNode>(name: &str, node: &N, config: &ResolverConfig) -> String {
    let mut resolved = name.to_owned();
    if !config.text_token.is_empty() && resolved.contains(config.text_token.as_str()) {
        let text = node.text();
        if !text.contains(' ') {
            resolved = resolved.replace(config.text_token.as_str(), text);
        }
    }
    if !config.type_token.is_empty() && resolved.contains(config.type_token.as_str()) {
        resolved = resolved.replace(config.type_token.as_str(), node.kind());
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::{node_at, parse_rust};
    use rstest::rstest;

    #[rstest]
    #[case("foo._TEXT_", "identifier", "foo.bar")]
    #[case("foo._TEXT_", "function_item", "foo._TEXT_")]
    #[case("meta._TYPE_", "function_item", "meta.function_item")]
    #[case("a._TYPE_._TEXT_", "identifier", "a.identifier.bar")]
    #[case("plain.scope", "identifier", "plain.scope")]
    fn interpolates_text_and_type(#[case] name: &str, #[case] kind: &str, #[case] expected: &str) {
        let parsed = parse_rust("fn bar() {}");
        let node = node_at(&parsed.root(), kind);
        let config = ResolverConfig::default();

        assert_eq!(interpolate_name(name, &node, &config), expected);
    }

    #[test]
    fn properties_keep_insertion_order() {
        let parsed = parse_rust("fn bar() {}");
        let capture = Capture::new(parsed.root(), "source")
            .with_property("offsetEnd", "-1")
            .with_property("startAt", "firstChild.endPosition")
            .with_property("final", "true");

        let keys: Vec<_> = capture.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, ["offsetEnd", "startAt", "final"]);
    }
}
