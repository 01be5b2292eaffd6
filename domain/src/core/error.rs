//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Question is too long ({length} characters, max {max})")]
    QuestionTooLong { length: usize, max: usize },

    #[error("Invalid user id: {0}")]
    InvalidUserId(String),
}

impl DomainError {
    /// Check if this error was caused by caller input (as opposed to system state)
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            DomainError::EmptyQuestion
                | DomainError::QuestionTooLong { .. }
                | DomainError::InvalidUserId(_)
        )
    }
}
