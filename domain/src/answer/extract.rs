//! Code-fence unwrapping for provider output.

use regex::Regex;
use std::sync::LazyLock;

/// A fenced block, optionally labeled `json`, spanning the whole input.
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^```(?i:json)?[ \t]*\r?\n?(.*?)```$").expect("fence pattern is valid")
});

/// Unwrap a model reply that was wrapped in a markdown code fence.
///
/// If the trimmed input is a single fenced block (with or without a `json`
/// label), the inner content is returned trimmed. Nested fences are unwrapped
/// until none remain, which keeps the function idempotent. Anything else is
/// returned unchanged; deciding whether it is valid JSON is the validator's
/// job.
///
/// ```
/// use docent_domain::extract;
///
/// assert_eq!(extract("```json\n{\"a\":1}\n```"), "{\"a\":1}");
/// assert_eq!(extract("not json at all"), "not json at all");
/// ```
pub fn extract(text: &str) -> &str {
    let mut current = text;
    loop {
        let trimmed = current.trim();
        match FENCED_BLOCK.captures(trimmed).and_then(|c| c.get(1)) {
            Some(inner) => current = inner.as_str().trim(),
            None => return current,
        }
    }
}
