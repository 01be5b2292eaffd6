//! History store port
//!
//! Append-only storage for question/answer exchanges, keyed by user.

use async_trait::async_trait;
use docent_domain::{QaExchange, UserId};
use thiserror::Error;

/// Errors that can occur while reading or writing history
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("History store unavailable: {0}")]
    Unavailable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persistent record of answered questions
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append one exchange. Records are never updated or deleted.
    async fn append(&self, exchange: &QaExchange) -> Result<(), HistoryError>;

    /// The user's exchanges, newest first, at most `limit` of them.
    async fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<QaExchange>, HistoryError>;
}
