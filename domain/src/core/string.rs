//! String utilities for the domain layer.

/// Truncate a string to at most `max_chars` characters.
///
/// Counts Unicode scalar values rather than bytes, so the result never
/// splits a character. Returns a sub-slice of the original string; no
/// ellipsis is appended.
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}

/// Truncate a string for log output, appending `...` when shortened.
pub fn preview(s: &str, max_chars: usize) -> String {
    let cut = truncate_chars(s, max_chars);
    if cut.len() == s.len() {
        s.to_string()
    } else {
        format!("{}...", cut)
    }
}
