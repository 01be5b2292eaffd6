//! Provider value objects.
//!
//! - [`ProviderLabel`]: position of a provider in the fallback chain
//! - [`ProviderAttempt`]: one call to one provider, kept only while a
//!   question is being answered

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Position of a provider in the fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderLabel {
    Primary,
    Secondary,
}

impl ProviderLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderLabel::Primary => "primary",
            ProviderLabel::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for ProviderLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a single provider call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The provider returned a non-empty completion (not yet validated).
    Completed { raw: String },
    /// The call failed; `reason` is the rendered provider error.
    Failed { reason: String },
}

/// One call to one provider.
#[derive(Debug, Clone)]
pub struct ProviderAttempt {
    pub label: ProviderLabel,
    /// Provider name, e.g. "anthropic".
    pub provider: String,
    /// Model identifier sent to the provider.
    pub model: String,
    pub outcome: AttemptOutcome,
    pub elapsed: Duration,
}

impl ProviderAttempt {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Completed { .. })
    }

    /// Raw completion text, if the call succeeded.
    pub fn raw(&self) -> Option<&str> {
        match &self.outcome {
            AttemptOutcome::Completed { raw } => Some(raw),
            AttemptOutcome::Failed { .. } => None,
        }
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match &self.outcome {
            AttemptOutcome::Failed { reason } => Some(reason),
            AttemptOutcome::Completed { .. } => None,
        }
    }
}
