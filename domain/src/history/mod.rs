//! History subdomain: persisted question/answer exchanges.

use crate::answer::StructuredAnswer;
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the caller a history record belongs to (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub const MAX_LEN: usize = 128;

    pub fn try_new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.len() > Self::MAX_LEN
            || trimmed.chars().any(char::is_control)
        {
            return Err(DomainError::InvalidUserId(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        UserId::try_new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// One persisted question/answer pair.
///
/// Only successful answers are ever recorded: [`QaExchange::record`] refuses
/// `Error` answers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaExchange {
    pub user_id: UserId,
    pub question: String,
    pub response: StructuredAnswer,
    pub timestamp: DateTime<Utc>,
}

impl QaExchange {
    /// Build a record, or `None` if the answer is an error.
    pub fn record(
        user_id: UserId,
        question: impl Into<String>,
        response: StructuredAnswer,
        timestamp: DateTime<Utc>,
    ) -> Option<Self> {
        if response.is_error() {
            return None;
        }
        Some(Self {
            user_id,
            question: question.into(),
            response,
            timestamp,
        })
    }
}
