//! String processing utilities
//!
//! Rendered source fragments come straight out of the parsed file, so
//! multi-line types and signatures are collapsed before they become part of a
//! declaration record.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("static whitespace pattern");
}

/// Collapse every whitespace run to a single space and trim both ends
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  map[string]\n\t*Widget  "), "map[string] *Widget");
        assert_eq!(normalize_whitespace("func(ctx  Context)\n error"), "func(ctx Context) error");
        assert_eq!(normalize_whitespace(""), "");
    }

    proptest! {
        #[test]
        fn normalized_text_has_no_whitespace_runs(text in "[a-z \\t\\n]{0,40}") {
            let normalized = normalize_whitespace(&text);
            prop_assert!(!normalized.contains("  "));
            prop_assert!(!normalized.contains('\n'));
            prop_assert!(!normalized.contains('\t'));
            prop_assert_eq!(normalized.trim(), normalized.as_str());
        }
    }
}
