//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Resolve an API key: the direct value wins, then the named env variable.
/// Blank values count as absent.
fn resolve_api_key(
    direct: Option<&str>,
    env_name: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    direct
        .map(str::to_string)
        .or_else(|| lookup(env_name))
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
}

fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Anthropic API provider configuration (`[providers.primary]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key (default: "ANTHROPIC_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Anthropic API version header.
    pub api_version: String,
    /// Max tokens per completion.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.anthropic.com".to_string(),
            model: "claude-3-5-haiku-latest".to_string(),
            api_version: "2023-06-01".to_string(),
            max_tokens: 2000,
            timeout_secs: 30,
        }
    }
}

impl FileAnthropicConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env, env_lookup)
    }
}

/// OpenAI API provider configuration (`[providers.secondary]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Set to false to disable the fallback entirely.
    pub enabled: bool,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Direct API key (prefer the env var).
    pub api_key: Option<String>,
    /// Base URL for the OpenAI API (can be overridden for compatible services).
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Max tokens per completion.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 2000,
            timeout_secs: 30,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), &self.api_key_env, env_lookup)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    /// Primary provider (Anthropic Messages API).
    pub primary: FileAnthropicConfig,
    /// Fallback provider (OpenAI Chat Completions API).
    pub secondary: FileOpenAiConfig,
}

impl FileProvidersConfig {
    /// Whether at least one provider can authenticate.
    pub fn any_credential(&self) -> bool {
        self.primary.resolve_api_key().is_some()
            || (self.secondary.enabled && self.secondary.resolve_api_key().is_some())
    }
}
