//! LLM provider port
//!
//! Defines the capability every provider adapter implements: turn a question
//! plus the knowledge document into raw completion text.

use async_trait::async_trait;
use docent_domain::{KnowledgeDocument, Question};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during a provider call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("No API key configured for {0}")]
    MissingCredential(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Empty completion")]
    EmptyCompletion,

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
}

/// A large-language-model completion service
///
/// Implementations (adapters) live in the infrastructure layer. They return
/// the completion verbatim; parsing it is the validator's job.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider name used in logs (e.g. "anthropic")
    fn name(&self) -> &str;

    /// Model identifier sent with each request
    fn model(&self) -> &str;

    /// Whether an API key is available. A provider without one fails every
    /// call with [`ProviderError::MissingCredential`].
    fn has_credential(&self) -> bool;

    /// Ask the model `question`, constrained to `document`.
    async fn call(
        &self,
        question: &Question,
        document: &KnowledgeDocument,
    ) -> Result<String, ProviderError>;
}
