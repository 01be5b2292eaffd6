//! Anthropic Messages API adapter (primary provider)

use super::{ChatMessage, HttpProviderSettings, non_empty, send_json};
use crate::config::FileAnthropicConfig;
use async_trait::async_trait;
use docent_application::{LlmProvider, ProviderError};
use docent_domain::{KnowledgeDocument, Question};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [ChatMessage<'a>; 1],
}

/// Calls `POST {base_url}/v1/messages`.
pub struct AnthropicProvider {
    settings: HttpProviderSettings,
    api_version: String,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn try_new(
        settings: HttpProviderSettings,
        api_version: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let client = settings.build_client()?;
        Ok(Self {
            settings,
            api_version: api_version.into(),
            client,
        })
    }

    /// Build from the `[providers.primary]` section.
    pub fn from_config(
        config: &FileAnthropicConfig,
        document_budget_chars: usize,
    ) -> Result<Self, ProviderError> {
        let settings = HttpProviderSettings {
            api_key: config.resolve_api_key(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
            document_budget_chars,
        };
        Self::try_new(settings, config.api_version.clone())
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            system,
            messages: [ChatMessage {
                role: "user",
                content: user,
            }],
        }
    }
}

/// Concatenate the `text` blocks of a Messages API response.
fn completion_text(body: &Value) -> Result<String, ProviderError> {
    let blocks = body
        .get("content")
        .and_then(Value::as_array)
        .ok_or_else(|| ProviderError::InvalidResponse("missing 'content' array".to_string()))?;

    let text: String = blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|block| block.get("text").and_then(Value::as_str))
        .collect();

    non_empty(text)
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    fn has_credential(&self) -> bool {
        self.settings.api_key.is_some()
    }

    async fn call(
        &self,
        question: &Question,
        document: &KnowledgeDocument,
    ) -> Result<String, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or_else(|| ProviderError::MissingCredential(self.name().to_string()))?;

        let prompt = self.settings.prompt(question, document);
        let body = self.request_body(&prompt.system, &prompt.user);

        debug!(
            model = %self.settings.model,
            max_tokens = self.settings.max_tokens,
            "Calling Anthropic Messages API"
        );

        let request = self
            .client
            .post(self.settings.endpoint("/v1/messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(&body);

        let response = send_json(request, self.settings.timeout).await?;
        completion_text(&response)
    }
}
