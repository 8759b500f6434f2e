//! Lexical type-reference extraction.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier pattern");
}

/// Markers removed before tokenizing; they never belong to an identifier
const NOISE_TOKENS: [&str; 5] = ["*", "[]", "map[", "chan ", "<-"];

const BUILTIN_TYPES: [&str; 24] = [
    "bool", "byte", "complex64", "complex128", "error", "float32", "float64", "int",
    "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr", "interface", "func", "struct", "any",
];

/// Whether `name` is a predeclared type or a type keyword
pub fn is_builtin_type(name: &str) -> bool {
    BUILTIN_TYPES.contains(&name)
}

/// Whether `name` is a plain ASCII identifier
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | ',')
}

/// Extract the identifiers a type or signature fragment refers to.
///
/// `"*[]map[string]UserService"` yields `{UserService}` and `"pkg.Reader"`
/// yields `{Reader}`. Built-in type names are skipped; qualified names with
/// more than one dot and tokens that are not identifiers are dropped.
pub fn extract_type_dependencies(fragment: &str) -> BTreeSet<String> {
    let cleaned = NOISE_TOKENS
        .iter()
        .fold(fragment.to_string(), |text, noise| text.replace(noise, ""));

    let mut deps = BTreeSet::new();
    for token in cleaned.split(is_separator).filter(|t| !t.is_empty()) {
        if is_builtin_type(token) {
            continue;
        }

        if token.contains('.') {
            let parts: Vec<&str> = token.split('.').collect();
            if let [_, selected] = parts.as_slice() {
                if is_valid_identifier(selected) {
                    deps.insert((*selected).to_string());
                }
            }
        } else if is_valid_identifier(token) {
            deps.insert(token.to_string());
        }
    }
    deps
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn deps(fragment: &str) -> Vec<String> {
        extract_type_dependencies(fragment).into_iter().collect()
    }

    #[test]
    fn test_noise_is_stripped() {
        assert_eq!(deps("*[]map[string]UserService"), vec!["UserService"]);
        assert_eq!(deps("<-chan Event"), vec!["Event"]);
        assert_eq!(deps("chan *Job"), vec!["Job"]);
    }

    #[test]
    fn test_builtins_only() {
        assert!(deps("int").is_empty());
        assert!(deps("map[string]interface{}").is_empty());
        assert!(deps("func(int) (bool, error)").is_empty());
        assert!(deps("").is_empty());
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(deps("pkg.Reader"), vec!["Reader"]);
        assert_eq!(deps("Handler *services.UserHandler"), vec!["Handler", "UserHandler"]);
        assert!(deps("a.b.c").is_empty());
    }

    #[test]
    fn test_signature_fragment() {
        assert_eq!(
            deps("func(ctx Context) (Result, error)"),
            vec!["Context", "Result", "ctx"]
        );
    }

    #[test]
    fn test_invalid_tokens_are_dropped() {
        assert!(deps("[16]byte").is_empty());
        assert_eq!(deps("x ...Option"), vec!["x"]);
        assert!(deps("@@@ 42").is_empty());
    }

    #[test]
    fn test_identifier_check() {
        assert!(is_valid_identifier("_private9"));
        assert!(!is_valid_identifier("9lives"));
        assert!(!is_valid_identifier(""));
        assert!(!is_valid_identifier("a-b"));
    }

    proptest! {
        #[test]
        fn extraction_yields_only_identifiers(fragment in "[ -~]{0,40}") {
            for dep in extract_type_dependencies(&fragment) {
                prop_assert!(is_valid_identifier(&dep));
            }
        }

        #[test]
        fn unqualified_builtins_are_never_extracted(fragment in "[a-z ,()]{0,40}") {
            for dep in extract_type_dependencies(&fragment) {
                prop_assert!(!is_builtin_type(&dep));
            }
        }
    }
}
