//! OpenAI Chat Completions adapter (fallback provider)

use super::{ChatMessage, HttpProviderSettings, non_empty, send_json};
use crate::config::FileOpenAiConfig;
use async_trait::async_trait;
use docent_application::{LlmProvider, ProviderError};
use docent_domain::{KnowledgeDocument, Question};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
}

/// Calls `POST {base_url}/v1/chat/completions`.
///
/// Requests JSON mode, so compatible services that do not support
/// `response_format` may reject the call.
pub struct OpenAiProvider {
    settings: HttpProviderSettings,
    client: reqwest::Client,
}

impl OpenAiProvider {
    pub fn try_new(settings: HttpProviderSettings) -> Result<Self, ProviderError> {
        let client = settings.build_client()?;
        Ok(Self { settings, client })
    }

    /// Build from the `[providers.secondary]` section.
    pub fn from_config(
        config: &FileOpenAiConfig,
        document_budget_chars: usize,
    ) -> Result<Self, ProviderError> {
        Self::try_new(HttpProviderSettings {
            api_key: config.resolve_api_key(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
            document_budget_chars,
        })
    }

    fn request_body<'a>(&'a self, system: &'a str, user: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
        }
    }
}

/// `choices[0].message.content` of a chat completion.
fn completion_text(body: &Value) -> Result<String, ProviderError> {
    let message = body
        .pointer("/choices/0/message")
        .ok_or_else(|| ProviderError::InvalidResponse("missing 'choices[0].message'".to_string()))?;

    // A null content (refusal, tool call) counts as empty
    let content = message
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default();

    non_empty(content.to_string())
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
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
            "Calling OpenAI Chat Completions API"
        );

        let request = self
            .client
            .post(self.settings.endpoint("/v1/chat/completions"))
            .bearer_auth(api_key)
            .json(&body);

        let response = send_json(request, self.settings.timeout).await?;
        completion_text(&response)
    }
}
