//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question about the knowledge document (Value Object)
///
/// Holds the trimmed user input. Construction fails for empty input and for
/// questions longer than [`Question::MAX_CHARS`] characters, so a `Question`
/// that reaches a provider is always worth sending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Question {
    content: String,
}

impl Question {
    /// Maximum accepted question length, in characters.
    pub const MAX_CHARS: usize = 2000;

    /// Try to create a new question from raw user input.
    pub fn try_new(content: impl Into<String>) -> Result<Self, DomainError> {
        let content = content.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        let length = trimmed.chars().count();
        if length > Self::MAX_CHARS {
            return Err(DomainError::QuestionTooLong {
                length,
                max: Self::MAX_CHARS,
            });
        }
        Ok(Self {
            content: trimmed.to_string(),
        })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl TryFrom<String> for Question {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Question::try_new(value)
    }
}

impl From<Question> for String {
    fn from(question: Question) -> Self {
        question.content
    }
}
