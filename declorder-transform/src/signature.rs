//! Method signature re-parsing
//!
//! Interface methods are stored as rendered text such as
//! `Read(p []byte) (n int, err error)`. Stub generation needs the pieces
//! back: name, parameter list and return clause.

/// A method signature split into its parts, borrowing from the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSignature<'a> {
    pub name: &'a str,
    /// Parameter list without the enclosing parentheses
    pub params: &'a str,
    /// Trimmed return clause; empty when the method returns nothing
    pub returns: &'a str,
}

/// Split `signature` at its first `(` and the `)` closing the parameter list.
///
/// Returns `None` for text that is not a method signature: no parameter
/// list, an unbalanced one, or an empty name. Embedded interfaces such as
/// `fmt.Stringer` fall in the first group.
pub fn parse_method_signature(signature: &str) -> Option<MethodSignature<'_>> {
    let open = signature.find('(')?;
    let name = signature[..open].trim();
    if name.is_empty() {
        return None;
    }

    let remainder = &signature[open + 1..];
    let mut depth = 0usize;
    let close = remainder.char_indices().find_map(|(index, c)| match c {
        '(' => {
            depth += 1;
            None
        }
        ')' if depth == 0 => Some(index),
        ')' => {
            depth -= 1;
            None
        }
        _ => None,
    })?;

    Some(MethodSignature {
        name,
        params: &remainder[..close],
        returns: remainder[close + 1..].trim(),
    })
}
