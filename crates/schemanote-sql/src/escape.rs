//! String literal escaping shared by both dialects

/// Escape comment text for use inside a single-quoted literal
///
/// Quotes are doubled; backslashes, newlines and carriage returns become
/// backslash escapes.
pub fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\'' => escaped.push_str("''"),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Quoted literal for a comment, or `NULL` when the comment is empty
pub fn string_literal(text: &str) -> String {
    if text.is_empty() {
        "NULL".to_string()
    } else {
        format!("'{}'", escape_string(text))
    }
}
