//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod history;
mod knowledge;
mod logging;
mod output;
mod providers;
mod server;

pub use history::FileHistoryConfig;
pub use knowledge::FileKnowledgeConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use providers::{FileAnthropicConfig, FileOpenAiConfig, FileProvidersConfig};
pub use server::FileServerConfig;

use docent_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Primary and fallback LLM providers
    pub providers: FileProvidersConfig,
    /// Knowledge document location
    pub knowledge: FileKnowledgeConfig,
    /// Q&A history storage
    pub history: FileHistoryConfig,
    /// HTTP server settings
    pub server: FileServerConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation transcript settings
    pub logging: FileLoggingConfig,
}

fn empty(field: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::EmptyValue {
            field: field.to_string(),
        },
        format!("{}: value must not be empty", field),
    )
}

fn zero(field: &str) -> ConfigIssue {
    ConfigIssue::error(
        ConfigIssueCode::ZeroValue {
            field: field.to_string(),
        },
        format!("{}: value must be greater than zero", field),
    )
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable. Warnings describe setups that
    /// start but answer every question with a CFG error.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        // 1. Providers
        let primary = &self.providers.primary;
        if primary.model.trim().is_empty() {
            issues.push(empty("providers.primary.model"));
        }
        if primary.base_url.trim().is_empty() {
            issues.push(empty("providers.primary.base_url"));
        }
        if primary.max_tokens == 0 {
            issues.push(zero("providers.primary.max_tokens"));
        }
        if primary.timeout_secs == 0 {
            issues.push(zero("providers.primary.timeout_secs"));
        }

        let secondary = &self.providers.secondary;
        if secondary.enabled {
            if secondary.model.trim().is_empty() {
                issues.push(empty("providers.secondary.model"));
            }
            if secondary.base_url.trim().is_empty() {
                issues.push(empty("providers.secondary.base_url"));
            }
            if secondary.max_tokens == 0 {
                issues.push(zero("providers.secondary.max_tokens"));
            }
            if secondary.timeout_secs == 0 {
                issues.push(zero("providers.secondary.timeout_secs"));
            }
        }

        if !self.providers.any_credential() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::NoCredentials,
                format!(
                    "no provider API key found (set {} or {})",
                    primary.api_key_env, secondary.api_key_env
                ),
            ));
        }

        // 2. Knowledge document
        if self.knowledge.max_chars == 0 {
            issues.push(zero("knowledge.max_chars"));
        }
        match &self.knowledge.path {
            None => issues.push(ConfigIssue::warning(
                ConfigIssueCode::KnowledgeUnavailable {
                    path: String::new(),
                },
                "knowledge.path is not set; every question will be answered with CFG02",
            )),
            Some(path) if !path.exists() => issues.push(ConfigIssue::warning(
                ConfigIssueCode::KnowledgeUnavailable {
                    path: path.display().to_string(),
                },
                format!("knowledge.path: '{}' does not exist", path.display()),
            )),
            Some(_) => {}
        }

        // 3. History
        if self.history.limit == 0 {
            issues.push(zero("history.limit"));
        }

        // 4. Server
        if self.server.bind.parse::<SocketAddr>().is_err() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::InvalidValue {
                    field: "server.bind".to_string(),
                    value: self.server.bind.clone(),
                },
                format!(
                    "server.bind: '{}' is not a valid socket address",
                    self.server.bind
                ),
            ));
        }

        issues
    }
}
