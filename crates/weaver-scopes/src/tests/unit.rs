//! Unit tests driving the resolver with real highlighting queries.

use rstest::rstest;
use tree_sitter::{QueryCursor, StreamingIterator};

use crate::tests::support::{ParsedSource, parse_rust, render, rust_query};
use crate::{ScopeResolver, captures_for_match, collect_captures};

const HIGHLIGHTS: &str = r#"
((function_item name: (identifier) @entity.name.function)
  (#set! final "true"))
((string_literal) @string.quoted.double)
((string_literal) @punctuation.definition.string.begin
  (#set! endAt "firstChild.endPosition"))
((string_literal) @punctuation.definition.string.end
  (#set! startAt "lastChild.startPosition"))
(identifier) @variable
"#;

fn highlight(parsed: &ParsedSource, query_source: &str) -> Vec<String> {
    let query = rust_query(query_source);
    let mut resolver = ScopeResolver::new();
    for capture in collect_captures(&query, parsed.tree().root_node(), parsed.source()) {
        resolver
            .store(&capture, &parsed.layer())
            .unwrap_or_else(|err| panic!("store {}: {err}", capture.name));
    }
    render(resolver.boundary_map())
}

// =============================================================================
// Query-driven resolution
// =============================================================================

#[test]
fn highlights_split_string_delimiters_and_lock_function_names() {
    let parsed = parse_rust(r#"fn main() { let s = "hi"; }"#);

    let lines = highlight(&parsed, HIGHLIGHTS);

    assert_eq!(
        lines,
        [
            "0:3 +entity.name.function",
            "0:7 -entity.name.function",
            "0:16 +variable",
            "0:17 -variable",
            "0:20 +string.quoted.double +punctuation.definition.string.begin",
            "0:21 -punctuation.definition.string.begin",
            "0:23 +punctuation.definition.string.end",
            "0:24 -punctuation.definition.string.end -string.quoted.double",
        ]
    );
}

#[test]
fn ignore_sentinel_silences_later_captures() {
    let parsed = parse_rust("// note\nfn main() {}");
    let query = r#"
((line_comment) @_IGNORE_ (#set! final "true"))
(line_comment) @comment.line
"#;

    assert!(highlight(&parsed, query).is_empty());
}

#[test]
fn match_adjustments_cross_rows() {
    let parsed = parse_rust("fn main() {\n    call();\n}");
    let query = r#"
((block) @meta.block
  (#set! startAfterFirstMatchOf "\\{")
  (#set! endBeforeFirstMatchOf "\\}"))
"#;

    assert_eq!(highlight(&parsed, query), ["0:11 +meta.block", "2:0 -meta.block"]);
}

#[rstest]
#[case("(parameters) @meta._TYPE_", ["0:7 +meta.parameters", "0:9 -meta.parameters"])]
#[case("(identifier) @entity._TEXT_", ["0:3 +entity.main", "0:7 -entity.main"])]
fn query_scope_names_interpolate(#[case] query: &str, #[case] expected: [&str; 2]) {
    let parsed = parse_rust("fn main() {}");

    assert_eq!(highlight(&parsed, query), expected);
}

#[test]
fn captures_for_match_converts_one_match() {
    let parsed = parse_rust("fn main() {}");
    let query = rust_query(
        r#"((function_item name: (identifier) @name body: (block) @body)
             (#set! @body shy "true"))"#,
    );
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, parsed.tree().root_node(), parsed.source().as_bytes());
    let first = matches.next().expect("one match");

    let captures = captures_for_match(&query, first, parsed.source());

    let names: Vec<_> = captures.iter().map(|capture| capture.name.as_str()).collect();
    assert_eq!(names, ["name", "body"]);
    let shy: Vec<_> = captures
        .iter()
        .map(|capture| capture.properties.contains_key("shy"))
        .collect();
    assert_eq!(shy, [false, true]);
}
