//! Console spinner for answering progress

use colored::Colorize;
use docent_application::AnswerProgressNotifier;
use docent_domain::{AnswerKind, ProviderLabel};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Shows which provider is being asked, with a spinner on stderr
pub struct AnswerSpinner {
    bar: Mutex<Option<ProgressBar>>,
}

impl AnswerSpinner {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn provider_prefix(label: ProviderLabel) -> &'static str {
        match label {
            ProviderLabel::Primary => "Primary",
            ProviderLabel::Secondary => "Fallback",
        }
    }
}

impl Default for AnswerSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerProgressNotifier for AnswerSpinner {
    fn on_provider_start(&self, label: ProviderLabel, provider: &str) {
        let Ok(mut slot) = self.bar.lock() else {
            return;
        };
        let bar = slot.get_or_insert_with(|| {
            let bar = ProgressBar::new_spinner();
            bar.set_style(Self::spinner_style());
            bar.enable_steady_tick(Duration::from_millis(100));
            bar
        });
        bar.set_prefix(Self::provider_prefix(label));
        bar.set_message(format!("asking {}...", provider));
    }

    fn on_provider_failed(&self, label: ProviderLabel, provider: &str, reason: &str) {
        if let Ok(slot) = self.bar.lock()
            && let Some(bar) = slot.as_ref()
        {
            bar.println(format!(
                "{} {} ({}) failed: {}",
                "x".red(),
                provider,
                label,
                reason
            ));
        }
    }

    fn on_answer_ready(&self, kind: AnswerKind) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(bar) = slot.take()
        {
            if kind == AnswerKind::Error {
                bar.abandon_with_message(format!("{}", "no usable answer".red()));
            } else {
                bar.finish_and_clear();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_clears_bar() {
        let spinner = AnswerSpinner::new();
        spinner.on_provider_start(ProviderLabel::Primary, "anthropic");
        spinner.on_provider_failed(ProviderLabel::Primary, "anthropic", "Timeout after 30s");
        spinner.on_provider_start(ProviderLabel::Secondary, "openai");
        assert!(spinner.bar.lock().unwrap().is_some());

        spinner.on_answer_ready(AnswerKind::Text);
        assert!(spinner.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_answer_without_start_is_noop() {
        let spinner = AnswerSpinner::default();
        spinner.on_answer_ready(AnswerKind::Error);
        assert!(spinner.bar.lock().unwrap().is_none());
    }
}
