//! Knowledge document value object

use crate::core::string::truncate_chars;
use std::sync::Arc;

/// The fixed reference text every answer must come from.
///
/// Cheap to clone; the text is shared and never modified after loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeDocument {
    text: Arc<str>,
}

impl KnowledgeDocument {
    /// Default excerpt size sent to providers, in characters.
    pub const DEFAULT_BUDGET_CHARS: usize = 25_000;

    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    /// An empty document, used when loading failed.
    pub fn empty() -> Self {
        Self::new("")
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// A document of only whitespace counts as unavailable.
    pub fn is_available(&self) -> bool {
        !self.text.trim().is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// The leading `budget_chars` characters of the document.
    ///
    /// Content past the budget is dropped silently; there is no relevance
    /// ranking.
    pub fn excerpt(&self, budget_chars: usize) -> &str {
        truncate_chars(&self.text, budget_chars)
    }

    pub fn is_truncated_at(&self, budget_chars: usize) -> bool {
        self.excerpt(budget_chars).len() < self.text.len()
    }
}

impl Default for KnowledgeDocument {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability() {
        assert!(!KnowledgeDocument::empty().is_available());
        assert!(!KnowledgeDocument::new(" \n\t").is_available());
        assert!(KnowledgeDocument::new("Section 1").is_available());
    }

    #[test]
    fn test_excerpt_respects_character_budget() {
        let doc = KnowledgeDocument::new("αβγδε");
        assert_eq!(doc.excerpt(3), "αβγ");
        assert!(doc.is_truncated_at(3));
        assert_eq!(doc.excerpt(10), "αβγδε");
        assert!(!doc.is_truncated_at(5));
        assert_eq!(doc.char_count(), 5);
    }

    #[test]
    fn test_clone_shares_text() {
        let doc = KnowledgeDocument::new("shared");
        let copy = doc.clone();
        assert_eq!(doc, copy);
    }
}
