//! Reserved names recognised by the resolver.

use serde::{Deserialize, Serialize};

/// Default scope name that records metadata without emitting boundaries.
pub const DEFAULT_IGNORE_SCOPE: &str = "_IGNORE_";

/// Default token replaced by the captured node's text.
pub const DEFAULT_TEXT_TOKEN: &str = "_TEXT_";

/// Default token replaced by the captured node's grammar type.
pub const DEFAULT_TYPE_TOKEN: &str = "_TYPE_";

/// Owned default suppression sentinel, for serde.
pub fn default_ignore_scope() -> String {
    DEFAULT_IGNORE_SCOPE.to_owned()
}

/// Owned default text token, for serde.
pub fn default_text_token() -> String {
    DEFAULT_TEXT_TOKEN.to_owned()
}

/// Owned default type token, for serde.
pub fn default_type_token() -> String {
    DEFAULT_TYPE_TOKEN.to_owned()
}

/// Reserved names used while resolving capture names.
///
/// Grammars rarely need to change these; the type exists so that hosts
/// loading grammar packages can keep their own conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ResolverConfig {
    /// Scope name that suppresses boundaries while still claiming the range.
    pub ignore_scope: String,
    /// Token in a scope name replaced by the node's text.
    pub text_token: String,
    /// Token in a scope name replaced by the node's grammar type.
    pub type_token: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ignore_scope: default_ignore_scope(),
            text_token: default_text_token(),
            type_token: default_type_token(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let config: ResolverConfig =
            serde_json::from_str(r#"{ "ignore_scope": "_SKIP_" }"#).expect("config");

        assert_eq!(config.ignore_scope, "_SKIP_");
        assert_eq!(config.text_token, DEFAULT_TEXT_TOKEN);
        assert_eq!(config.type_token, DEFAULT_TYPE_TOKEN);
    }

    #[test]
    fn empty_config_matches_default() {
        let config: ResolverConfig = serde_json::from_str("{}").expect("config");
        assert_eq!(config, ResolverConfig::default());
    }
}
