//! Light markdown emphasis removal.

use regex::Regex;
use std::sync::LazyLock;

static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(.+?)\*\*").expect("bold pattern is valid"));
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)__(.+?)__").expect("bold pattern is valid"));

/// Replace `**text**` and `__text__` with `text`.
///
/// Unpaired markers are left alone.
pub fn strip_bold(text: &str) -> String {
    let stars = BOLD_STARS.replace_all(text, "$1");
    BOLD_UNDERSCORES.replace_all(&stars, "$1").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_both_styles() {
        assert_eq!(strip_bold("a **bold** and __strong__ word"), "a bold and strong word");
    }

    #[test]
    fn test_multiple_spans() {
        assert_eq!(strip_bold("**one** two **three**"), "one two three");
    }

    #[test]
    fn test_unpaired_markers_kept() {
        assert_eq!(strip_bold("2 ** 3"), "2 ** 3");
        assert_eq!(strip_bold("plain"), "plain");
    }

    #[test]
    fn test_single_asterisk_untouched() {
        assert_eq!(strip_bold("*italic*"), "*italic*");
    }
}
