//! Answer Question use case.
//!
//! Sequences the provider fallback chain and validates the winning output:
//!
//! ```text
//! PRECHECK ──(no credential)──────────────────────────▶ Error CFG00
//!    │     ──(no document)────────────────────────────▶ Error CFG02
//!    ▼
//! PRIMARY ──ok──▶ validate(raw, primary)
//!    │ fail
//!    ▼
//! secondary configured? ──no──────────────────────────▶ Error F02
//!    │ yes
//!    ▼
//! SECONDARY ──ok──▶ validate(raw, secondary)
//!    │ fail
//!    ▼
//! Error F01
//! ```
//!
//! The primary is always tried first and exactly once; the secondary at most
//! once and only after the primary failed. Calls are never concurrent and a
//! validation failure is never retried.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::knowledge_source::KnowledgeSource;
use crate::ports::llm_provider::LlmProvider;
use crate::ports::progress::{AnswerProgressNotifier, NoAnswerProgress};
use docent_domain::core::string::preview;
use docent_domain::{
    AttemptOutcome, ErrorCode, KnowledgeDocument, ProviderAttempt, ProviderLabel, Question,
    StructuredAnswer, validate,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const NO_CREDENTIALS_MESSAGE: &str =
    "The assistant is not configured: no language model provider credentials are available.";
const NO_DOCUMENT_MESSAGE: &str =
    "The assistant is not configured: the knowledge document is unavailable.";
const ALL_FAILED_MESSAGE: &str =
    "All language model providers failed to answer. Please try again later.";
const NO_FALLBACK_MESSAGE: &str =
    "The language model provider failed to answer and no fallback provider is configured.";

/// Use case for answering one question from the knowledge document.
///
/// Depends only on the [`LlmProvider`] capability, never on a concrete
/// adapter, so tests can script success, failure and timeouts.
pub struct AnswerQuestionUseCase {
    primary: Arc<dyn LlmProvider>,
    secondary: Option<Arc<dyn LlmProvider>>,
    knowledge: Arc<dyn KnowledgeSource>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Clone for AnswerQuestionUseCase {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            secondary: self.secondary.clone(),
            knowledge: self.knowledge.clone(),
            conversation_logger: self.conversation_logger.clone(),
        }
    }
}

impl AnswerQuestionUseCase {
    pub fn new(primary: Arc<dyn LlmProvider>, knowledge: Arc<dyn KnowledgeSource>) -> Self {
        Self {
            primary,
            secondary: None,
            knowledge,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    /// Add the fallback provider.
    pub fn with_secondary(mut self, secondary: Arc<dyn LlmProvider>) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    /// Answer a question. Never fails: terminal failures become `Error` answers.
    pub async fn execute(&self, question: &Question) -> StructuredAnswer {
        self.execute_with_progress(question, &NoAnswerProgress).await
    }

    /// Answer a question with progress callbacks.
    pub async fn execute_with_progress(
        &self,
        question: &Question,
        progress: &dyn AnswerProgressNotifier,
    ) -> StructuredAnswer {
        info!("Answering question: {}", preview(question.content(), 100));
        self.conversation_logger.log(ConversationEvent::new(
            "question",
            serde_json::json!({ "question": question.content() }),
        ));

        let answer = self.run_chain(question, progress).await;

        match answer.error_code() {
            Some(code) => warn!(code = %code, "Answer resolved to an error"),
            None => info!(kind = %answer.kind(), provider = ?answer.provider(), "Answer ready"),
        }
        self.conversation_logger.log(ConversationEvent::new(
            "answer",
            serde_json::json!({ "response": &answer }),
        ));
        progress.on_answer_ready(answer.kind());

        answer
    }

    async fn run_chain(
        &self,
        question: &Question,
        progress: &dyn AnswerProgressNotifier,
    ) -> StructuredAnswer {
        // Precheck: a secondary without a key is the same as no secondary
        let secondary = self.secondary.as_ref().filter(|s| s.has_credential());
        if !self.primary.has_credential() && secondary.is_none() {
            return StructuredAnswer::failure(ErrorCode::Cfg00, NO_CREDENTIALS_MESSAGE, None);
        }

        let document = self.knowledge.document();
        if !document.is_available() {
            return StructuredAnswer::failure(ErrorCode::Cfg02, NO_DOCUMENT_MESSAGE, None);
        }

        let primary = self
            .attempt(ProviderLabel::Primary, &self.primary, question, &document, progress)
            .await;
        if let Some(raw) = primary.raw() {
            return validate(raw, ProviderLabel::Primary);
        }

        let Some(secondary) = secondary else {
            return StructuredAnswer::failure(
                ErrorCode::F02,
                NO_FALLBACK_MESSAGE,
                Some(ProviderLabel::Primary),
            );
        };

        info!(
            provider = secondary.name(),
            "Primary provider failed, falling back to secondary"
        );
        let fallback = self
            .attempt(ProviderLabel::Secondary, secondary, question, &document, progress)
            .await;
        match fallback.raw() {
            Some(raw) => validate(raw, ProviderLabel::Secondary),
            None => StructuredAnswer::failure(ErrorCode::F01, ALL_FAILED_MESSAGE, None),
        }
    }

    async fn attempt(
        &self,
        label: ProviderLabel,
        provider: &Arc<dyn LlmProvider>,
        question: &Question,
        document: &KnowledgeDocument,
        progress: &dyn AnswerProgressNotifier,
    ) -> ProviderAttempt {
        progress.on_provider_start(label, provider.name());
        debug!(
            label = %label,
            provider = provider.name(),
            model = provider.model(),
            "Calling provider"
        );

        let start = Instant::now();
        let outcome = match provider.call(question, document).await {
            Ok(raw) => AttemptOutcome::Completed { raw },
            Err(e) => {
                warn!(label = %label, provider = provider.name(), "Provider call failed: {}", e);
                let reason = e.to_string();
                progress.on_provider_failed(label, provider.name(), &reason);
                AttemptOutcome::Failed { reason }
            }
        };

        let attempt = ProviderAttempt {
            label,
            provider: provider.name().to_string(),
            model: provider.model().to_string(),
            outcome,
            elapsed: start.elapsed(),
        };

        self.conversation_logger.log(ConversationEvent::new(
            "provider_attempt",
            serde_json::json!({
                "label": attempt.label,
                "provider": attempt.provider,
                "model": attempt.model,
                "elapsed_ms": attempt.elapsed.as_millis() as u64,
                "success": attempt.succeeded(),
                "raw": attempt.raw(),
                "error": attempt.failure_reason(),
            }),
        ));

        attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::knowledge_source::StaticKnowledge;
    use crate::ports::llm_provider::ProviderError;
    use async_trait::async_trait;
    use docent_domain::{AnswerKind, ListItem};
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    /// Shared, ordered log of which provider was called.
    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    struct ScriptedProvider {
        name: &'static str,
        credential: bool,
        outcomes: Mutex<VecDeque<Result<String, ProviderError>>>,
        calls: CallLog,
    }

    impl ScriptedProvider {
        fn new(
            name: &'static str,
            outcomes: Vec<Result<String, ProviderError>>,
            calls: CallLog,
        ) -> Self {
            Self {
                name,
                credential: true,
                outcomes: Mutex::new(VecDeque::from(outcomes)),
                calls,
            }
        }

        fn without_credential(mut self) -> Self {
            self.credential = false;
            self
        }
    }

    #[async_trait]
    impl LlmProvider for ScriptedProvider {
        fn name(&self) -> &str {
            self.name
        }

        fn model(&self) -> &str {
            "test-model"
        }

        fn has_credential(&self) -> bool {
            self.credential
        }

        async fn call(
            &self,
            _question: &Question,
            _document: &KnowledgeDocument,
        ) -> Result<String, ProviderError> {
            self.calls.lock().unwrap().push(self.name);
            if !self.credential {
                return Err(ProviderError::MissingCredential(self.name.to_string()));
            }
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ProviderError::ConnectionError("script exhausted".into())))
        }
    }

    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn knowledge() -> Arc<dyn KnowledgeSource> {
        Arc::new(StaticKnowledge::new("Section 1.1 SAFE basics: ..."))
    }

    fn question() -> Question {
        Question::try_new("What is a SAFE?").unwrap()
    }

    fn text_json(answer: &str) -> String {
        serde_json::json!({"type": "text", "answer": answer, "follow_up": null}).to_string()
    }

    fn timeout() -> ProviderError {
        ProviderError::Timeout(Duration::from_secs(30))
    }

    fn answer_text(answer: &StructuredAnswer) -> &str {
        match answer {
            StructuredAnswer::Text { answer, .. } => answer,
            other => panic!("Expected Text, got {:?}", other),
        }
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Ok(text_json("From primary"))], calls.clone());
        let secondary = ScriptedProvider::new("secondary", vec![Ok(text_json("unused"))], calls.clone());
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer_text(&answer), "From primary");
        assert_eq!(answer.provider(), Some(ProviderLabel::Primary));
        assert_eq!(*calls.lock().unwrap(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_primary_timeout_falls_back_to_secondary() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Err(timeout())], calls.clone());
        let secondary =
            ScriptedProvider::new("secondary", vec![Ok(text_json("From secondary"))], calls.clone());
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer_text(&answer), "From secondary");
        assert_eq!(answer.provider(), Some(ProviderLabel::Secondary));
        // Primary exactly once, strictly before the secondary
        assert_eq!(*calls.lock().unwrap(), vec!["primary", "secondary"]);
    }

    #[tokio::test]
    async fn test_both_fail_is_f01() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new(
            "primary",
            vec![Err(ProviderError::HttpStatus { status: 500, body: "boom".into() })],
            calls.clone(),
        );
        let secondary = ScriptedProvider::new("secondary", vec![Err(ProviderError::EmptyCompletion)], calls.clone());
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer.error_code(), Some(ErrorCode::F01));
        assert_eq!(calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_primary_fails_without_secondary_is_f02() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Err(timeout())], calls.clone());
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge());

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer.error_code(), Some(ErrorCode::F02));
        assert_eq!(answer.provider(), Some(ProviderLabel::Primary));
    }

    #[tokio::test]
    async fn test_secondary_without_credential_is_skipped() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Err(timeout())], calls.clone());
        let secondary = ScriptedProvider::new("secondary", vec![], calls.clone()).without_credential();
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer.error_code(), Some(ErrorCode::F02));
        assert_eq!(*calls.lock().unwrap(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_no_credentials_is_cfg00_without_calls() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![], calls.clone()).without_credential();
        let secondary = ScriptedProvider::new("secondary", vec![], calls.clone()).without_credential();
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer.error_code(), Some(ErrorCode::Cfg00));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_document_is_cfg02_without_calls() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Ok(text_json("x"))], calls.clone());
        let use_case =
            AnswerQuestionUseCase::new(Arc::new(primary), Arc::new(StaticKnowledge::new("  ")));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer.error_code(), Some(ErrorCode::Cfg02));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_primary_without_key_falls_back_to_configured_secondary() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![], calls.clone()).without_credential();
        let secondary =
            ScriptedProvider::new("secondary", vec![Ok(text_json("Fallback"))], calls.clone());
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer_text(&answer), "Fallback");
        assert_eq!(*calls.lock().unwrap(), vec!["primary", "secondary"]);
    }

    #[tokio::test]
    async fn test_invalid_primary_output_is_not_retried() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Ok("Sure! Here's the answer.".into())], calls.clone());
        let secondary = ScriptedProvider::new("secondary", vec![Ok(text_json("unused"))], calls.clone());
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer.error_code(), Some(ErrorCode::Pv01));
        assert_eq!(answer.provider(), Some(ProviderLabel::Primary));
        assert_eq!(*calls.lock().unwrap(), vec!["primary"]);
    }

    #[tokio::test]
    async fn test_secondary_list_output_is_validated() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Err(timeout())], calls.clone());
        let raw = "```json\n{\"type\":\"list\",\"title\":\"Tips\",\"items\":[{\"point\":\"Plan\",\"detail\":\"Plan ahead\"}, 7]}\n```";
        let secondary = ScriptedProvider::new("secondary", vec![Ok(raw.into())], calls);
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary));

        let answer = use_case.execute(&question()).await;

        match answer {
            StructuredAnswer::List { title, items, context } => {
                assert_eq!(title, "Tips");
                assert_eq!(items, vec![ListItem::new("Plan", "Plan ahead"), ListItem::invalid()]);
                assert_eq!(context.provider, Some(ProviderLabel::Secondary));
            }
            other => panic!("Expected List, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_transcript_events() {
        let calls = CallLog::default();
        let primary = ScriptedProvider::new("primary", vec![Err(timeout())], calls.clone());
        let secondary = ScriptedProvider::new("secondary", vec![Ok(text_json("ok"))], calls);
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        let use_case = AnswerQuestionUseCase::new(Arc::new(primary), knowledge())
            .with_secondary(Arc::new(secondary))
            .with_conversation_logger(logger.clone());

        let answer = use_case.execute(&question()).await;

        assert_eq!(answer.kind(), AnswerKind::Text);
        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["question", "provider_attempt", "provider_attempt", "answer"]
        );
    }
}
