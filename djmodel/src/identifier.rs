//! Python identifier validation for generated field names.
//!
//! Casing transforms can still leave labels that are not valid Python names: a
//! leading digit, punctuation such as `%` or `/`, or a keyword like `class`. The
//! generated model would not even parse, so such names are rewritten here. Valid
//! names are never touched.

use std::borrow::Cow;

use unicode_ident::{is_xid_continue, is_xid_start};

/// Python 3 hard keywords; none of them may be used as an attribute name.
const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

// Python identifiers are XID_Start/XID_Continue, so `²` or `½` are rejected even
// though Rust counts them as alphanumeric.
fn is_identifier_start(c: char) -> bool {
    c == '_' || is_xid_start(c)
}

fn is_identifier_continue(c: char) -> bool {
    is_xid_continue(c)
}

pub fn is_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Returns true when `name` can be used as a Python attribute name as-is.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_identifier_start(first) => {
            chars.all(is_identifier_continue) && !is_keyword(name)
        }
        _ => false,
    }
}

/// Rewrites `name` into a valid Python identifier.
///
/// - an empty name becomes `field_<position>`
/// - characters that cannot appear in an identifier become `_`
/// - a name starting with a digit gets a `field_` prefix
/// - a keyword gets a `_field` suffix
pub fn sanitize_identifier(name: &str, position: usize) -> Cow<'_, str> {
    if is_valid_identifier(name) {
        return Cow::Borrowed(name);
    }
    if name.is_empty() {
        return Cow::Owned(format!("field_{position}"));
    }

    let mut sanitized: String = name
        .chars()
        .map(|c| if is_identifier_continue(c) { c } else { '_' })
        .collect();

    if sanitized.chars().next().is_some_and(|c| !is_identifier_start(c)) {
        sanitized.insert_str(0, "field_");
    }
    if is_keyword(&sanitized) {
        sanitized.push_str("_field");
    }

    Cow::Owned(sanitized)
}
