//! Zero-value inference for Go return clauses

use declorder_core::extractors::is_valid_identifier;

/// Words that start a type rather than name a result
const TYPE_KEYWORDS: [&str; 5] = ["func", "chan", "map", "struct", "interface"];

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.strip_prefix(keyword)
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_alphanumeric() || c == '_'))
}

/// Go expression for the zero value of `type_name`
pub fn zero_value(type_name: &str) -> String {
    let ty = type_name.trim();

    let nil_like = ty.starts_with('*')
        || ty.starts_with("[]")
        || ty.starts_with("map[")
        || ty.starts_with("<-")
        || ty == "any"
        || ["chan", "func", "interface"].iter().any(|kw| starts_with_keyword(ty, kw));
    if nil_like {
        return "nil".to_string();
    }

    let literal = match ty {
        "bool" => "false",
        "string" => "\"\"",
        "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32"
        | "uint64" | "uintptr" | "byte" | "rune" => "0",
        "float32" | "float64" => "0.0",
        "complex64" | "complex128" => "0+0i",
        "error" => "nil",
        _ if ty.contains('.') => "nil",
        _ => return format!("{ty}{{}}"),
    };
    literal.to_string()
}

/// Remove one pair of parentheses enclosing the whole clause
fn strip_outer_parens(clause: &str) -> &str {
    let Some(inner) = clause.strip_prefix('(') else {
        return clause;
    };

    let mut depth = 0usize;
    for (index, c) in inner.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => {
                return if index + 1 == inner.len() { inner[..index].trim() } else { clause };
            }
            ')' => depth -= 1,
            _ => {}
        }
    }
    clause
}

/// Split on commas outside any bracket pair
fn split_top_level(clause: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;

    for (index, c) in clause.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&clause[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&clause[start..]);
    parts
}

/// Type of a named result such as `n int`, `None` for a bare type
fn named_result_type(part: &str) -> Option<&str> {
    let (first, rest) = part.split_once(char::is_whitespace)?;
    let rest = rest.trim();
    (!rest.is_empty() && is_valid_identifier(first) && !TYPE_KEYWORDS.contains(&first)).then_some(rest)
}

/// Comma-separated zero values for a return clause, in declared order.
///
/// Accepts a bare type (`error`), a parenthesised list (`(int, error)`) and
/// named results, including grouped names such as `(x, y int)`. Returns an
/// empty string for an empty clause.
pub fn zero_values(returns: &str) -> String {
    let clause = strip_outer_parens(returns.trim());
    if clause.is_empty() {
        return String::new();
    }

    let parts: Vec<&str> = split_top_level(clause)
        .into_iter()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    let named: Vec<Option<&str>> = parts.iter().map(|part| named_result_type(part)).collect();
    let any_named = named.iter().any(Option::is_some);

    // In `x, y int` the bare `x` takes the type of the next named result
    let mut following_type: Option<&str> = None;
    let mut values: Vec<String> = parts
        .iter()
        .zip(&named)
        .rev()
        .map(|(&part, &named_type)| {
            let ty = match named_type {
                Some(ty) => {
                    following_type = Some(ty);
                    ty
                }
                None if any_named => following_type.unwrap_or(part),
                None => part,
            };
            zero_value(ty)
        })
        .collect();
    values.reverse();
    values.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_builtin_zero_values() {
        assert_eq!(zero_value("bool"), "false");
        assert_eq!(zero_value("string"), "\"\"");
        assert_eq!(zero_value("uintptr"), "0");
        assert_eq!(zero_value("rune"), "0");
        assert_eq!(zero_value("float32"), "0.0");
        assert_eq!(zero_value("complex128"), "0+0i");
        assert_eq!(zero_value("error"), "nil");
    }

    #[test]
    fn test_reference_types_are_nil() {
        for ty in [
            "*Widget",
            "[]byte",
            "map[string]int",
            "chan int",
            "chan<- Job",
            "<-chan Job",
            "func(int) error",
            "interface{}",
            "any",
            "io.Reader",
        ] {
            assert_eq!(zero_value(ty), "nil", "{ty}");
        }
    }

    #[test]
    fn test_composite_types() {
        assert_eq!(zero_value("Widget"), "Widget{}");
        assert_eq!(zero_value("channel"), "channel{}");
        assert_eq!(zero_value("[4]int"), "[4]int{}");
        assert_eq!(zero_value("struct{}"), "struct{}{}");
    }

    #[test]
    fn test_return_clauses() {
        assert_eq!(zero_values("(int, error)"), "0, nil");
        assert_eq!(zero_values("string"), "\"\"");
        assert_eq!(zero_values("*Widget"), "nil");
        assert_eq!(zero_values("Widget"), "Widget{}");
        assert_eq!(zero_values(""), "");
        assert_eq!(zero_values("()"), "");
    }

    #[test]
    fn test_named_results() {
        assert_eq!(zero_values("(n int, err error)"), "0, nil");
        assert_eq!(zero_values("(x, y float64, ok bool)"), "0.0, 0.0, false");
        assert_eq!(zero_values("(ch chan int)"), "nil");
    }

    #[test]
    fn test_nested_commas_stay_together() {
        assert_eq!(zero_values("(func(int, string) error, map[string]int)"), "nil, nil");
        assert_eq!(zero_values("(Pair[int, string], error)"), "Pair[int, string]{}, nil");
    }

    #[test]
    fn test_function_type_clause_is_not_unwrapped() {
        assert_eq!(strip_outer_parens("(int) (error)"), "(int) (error)");
        assert_eq!(strip_outer_parens("((int))"), "(int)");
    }

    proptest! {
        #[test]
        fn one_value_per_unnamed_result(types in prop::collection::vec("[A-Z][a-z]{0,6}|int|string|error|\\*[A-Z][a-z]{0,4}", 1..6)) {
            let clause = format!("({})", types.join(", "));
            let values = zero_values(&clause);
            prop_assert_eq!(values.split(", ").count(), types.len());
        }
    }
}
