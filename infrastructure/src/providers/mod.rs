//! HTTP provider adapters
//!
//! Each adapter implements the [`LlmProvider`](docent_application::LlmProvider)
//! port for one vendor API. Both share the request plumbing below: a
//! `reqwest` client with a per-request timeout, and a single mapping from
//! transport failures to [`ProviderError`].

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use docent_application::ProviderError;
use docent_domain::{AnswerPromptTemplate, KnowledgeDocument, Question, truncate_chars};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest error body kept in [`ProviderError::HttpStatus`].
const ERROR_BODY_PREVIEW_CHARS: usize = 500;

/// Connection settings shared by the HTTP adapters.
#[derive(Debug, Clone)]
pub struct HttpProviderSettings {
    /// `None` makes every call fail with `MissingCredential`.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
    /// Characters of the knowledge document embedded in the system prompt.
    pub document_budget_chars: usize,
}

impl HttpProviderSettings {
    /// `base_url` joined with `path`, tolerating a trailing slash.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(crate) fn build_client(&self) -> Result<reqwest::Client, ProviderError> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ProviderError::ConnectionError(e.to_string()))
    }

    /// System and user messages for `question`, with the document cut to
    /// the configured budget.
    pub(crate) fn prompt(&self, question: &Question, document: &KnowledgeDocument) -> Prompt {
        if document.is_truncated_at(self.document_budget_chars) {
            debug!(
                total_chars = document.char_count(),
                budget = self.document_budget_chars,
                "Knowledge document truncated for prompt"
            );
        }
        Prompt {
            system: AnswerPromptTemplate::system(document.excerpt(self.document_budget_chars)),
            user: AnswerPromptTemplate::user(question.content()),
        }
    }
}

/// Rendered prompt for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Prompt {
    pub system: String,
    pub user: String,
}

/// A chat message in the shape both vendor APIs accept.
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Map a transport failure to a [`ProviderError`].
pub(crate) fn map_transport_error(err: reqwest::Error, timeout: Duration) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout(timeout)
    } else {
        ProviderError::ConnectionError(err.to_string())
    }
}

/// Send `request` and return the JSON body of a 2xx response.
pub(crate) async fn send_json(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<Value, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|e| map_transport_error(e, timeout))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!(status = status.as_u16(), "Provider returned an error status");
        return Err(ProviderError::HttpStatus {
            status: status.as_u16(),
            body: truncate_chars(&body, ERROR_BODY_PREVIEW_CHARS).to_string(),
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| map_transport_error(e, timeout))?;

    serde_json::from_str(&body)
        .map_err(|e| ProviderError::InvalidResponse(format!("body is not JSON: {}", e)))
}

/// Reject blank completions.
pub(crate) fn non_empty(text: String) -> Result<String, ProviderError> {
    if text.trim().is_empty() {
        Err(ProviderError::EmptyCompletion)
    } else {
        Ok(text)
    }
}

/// In-process HTTP server standing in for a vendor API.
#[cfg(test)]
pub(crate) mod test_server {
    use axum::Router;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral local port and return its base URL.
    pub async fn spawn(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
