//! Escaping rules for literal text and bracket expressions.

use phf::{Set, phf_set};

/// Characters that must be backslash-escaped for a string to match itself
/// literally.
static METACHARACTERS: Set<char> = phf_set! {
    '^', '$', '(', ')', '[', ']', '{', '}', '?', '+', '*', '.', '|', '/',
};

/// Characters that must be backslash-escaped inside a bracket expression.
static CLASS_METACHARACTERS: Set<char> = phf_set! {
    '\\', '^', '[', ']', '-', '/',
};

/// Escape `text` so that the result matches `text` as literal characters.
///
/// Backslashes are doubled in the same pass that escapes the remaining
/// metacharacters; escaping them in a later pass would re-escape the
/// backslashes just inserted.
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '\\' {
            out.push_str("\\\\");
        } else if METACHARACTERS.contains(&c) {
            out.push('\\');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}

/// Append `c` to `out`, escaped if a bracket expression requires it.
pub(crate) fn push_class_char(out: &mut String, c: char) {
    if CLASS_METACHARACTERS.contains(&c) {
        out.push('\\');
    }
    out.push(c);
}
