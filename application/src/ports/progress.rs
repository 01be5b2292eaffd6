//! Progress notification port
//!
//! Defines the interface for reporting progress while a question is answered.

use docent_domain::{AnswerKind, ProviderLabel};

/// Callback for progress updates during answering
///
/// Implementations live in the presentation layer (e.g. a console spinner).
pub trait AnswerProgressNotifier: Send + Sync {
    /// Called before a provider is called
    fn on_provider_start(&self, label: ProviderLabel, provider: &str);

    /// Called when a provider call fails
    fn on_provider_failed(&self, _label: ProviderLabel, _provider: &str, _reason: &str) {}

    /// Called once the final answer is known
    fn on_answer_ready(&self, kind: AnswerKind);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoAnswerProgress;

impl AnswerProgressNotifier for NoAnswerProgress {
    fn on_provider_start(&self, _label: ProviderLabel, _provider: &str) {}
    fn on_answer_ready(&self, _kind: AnswerKind) {}
}
