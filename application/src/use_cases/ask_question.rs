//! Ask Question use case.
//!
//! The request-handler core: answers a question through
//! [`AnswerQuestionUseCase`] and records successful exchanges in the user's
//! history. History is best effort; a write failure is logged and never
//! changes the answer.

use super::answer_question::AnswerQuestionUseCase;
use crate::ports::history_store::HistoryStore;
use crate::ports::progress::{AnswerProgressNotifier, NoAnswerProgress};
use chrono::Utc;
use docent_domain::{QaExchange, Question, StructuredAnswer, UserId};
use std::sync::Arc;
use tracing::{debug, warn};

/// Input for the [`AskQuestionUseCase`].
#[derive(Debug, Clone)]
pub struct AskQuestionInput {
    pub question: Question,
    /// Caller identity; anonymous questions are answered but not recorded.
    pub user_id: Option<UserId>,
}

impl AskQuestionInput {
    pub fn new(question: Question) -> Self {
        Self {
            question,
            user_id: None,
        }
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Use case for answering a question on behalf of a caller.
#[derive(Clone)]
pub struct AskQuestionUseCase {
    answerer: AnswerQuestionUseCase,
    history: Arc<dyn HistoryStore>,
}

impl AskQuestionUseCase {
    pub fn new(answerer: AnswerQuestionUseCase, history: Arc<dyn HistoryStore>) -> Self {
        Self { answerer, history }
    }

    pub async fn execute(&self, input: AskQuestionInput) -> StructuredAnswer {
        self.execute_with_progress(input, &NoAnswerProgress).await
    }

    pub async fn execute_with_progress(
        &self,
        input: AskQuestionInput,
        progress: &dyn AnswerProgressNotifier,
    ) -> StructuredAnswer {
        let answer = self
            .answerer
            .execute_with_progress(&input.question, progress)
            .await;

        if let Some(user_id) = input.user_id {
            self.record(user_id, input.question, &answer).await;
        }

        answer
    }

    async fn record(&self, user_id: UserId, question: Question, answer: &StructuredAnswer) {
        let Some(exchange) =
            QaExchange::record(user_id, question.into_content(), answer.clone(), Utc::now())
        else {
            debug!(kind = %answer.kind(), "Not recording unsuccessful answer");
            return;
        };

        if let Err(e) = self.history.append(&exchange).await {
            warn!(user = %exchange.user_id, "Failed to record history: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::history_store::HistoryError;
    use crate::ports::knowledge_source::StaticKnowledge;
    use crate::ports::llm_provider::{LlmProvider, ProviderError};
    use async_trait::async_trait;
    use docent_domain::{AnswerKind, ErrorCode, KnowledgeDocument};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct FixedProvider {
        result: Result<String, ProviderError>,
    }

    #[async_trait]
    impl LlmProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn model(&self) -> &str {
            "fixed-model"
        }

        fn has_credential(&self) -> bool {
            true
        }

        async fn call(
            &self,
            _question: &Question,
            _document: &KnowledgeDocument,
        ) -> Result<String, ProviderError> {
            self.result.clone()
        }
    }

    #[derive(Default)]
    struct RecordingHistory {
        records: Mutex<Vec<QaExchange>>,
        fail: bool,
    }

    #[async_trait]
    impl HistoryStore for RecordingHistory {
        async fn append(&self, exchange: &QaExchange) -> Result<(), HistoryError> {
            if self.fail {
                return Err(HistoryError::Unavailable("disk full".to_string()));
            }
            self.records.lock().unwrap().push(exchange.clone());
            Ok(())
        }

        async fn recent(
            &self,
            _user_id: &UserId,
            _limit: usize,
        ) -> Result<Vec<QaExchange>, HistoryError> {
            Ok(self.records.lock().unwrap().clone())
        }
    }

    fn use_case(
        result: Result<String, ProviderError>,
        history: Arc<RecordingHistory>,
    ) -> AskQuestionUseCase {
        let answerer = AnswerQuestionUseCase::new(
            Arc::new(FixedProvider { result }),
            Arc::new(StaticKnowledge::new("The document.")),
        );
        AskQuestionUseCase::new(answerer, history)
    }

    fn input(user: Option<&str>) -> AskQuestionInput {
        let input = AskQuestionInput::new(Question::try_new("What is a SAFE?").unwrap());
        match user {
            Some(user) => input.with_user(UserId::try_new(user).unwrap()),
            None => input,
        }
    }

    const TEXT: &str = r#"{"type":"text","answer":"An agreement.","follow_up":null}"#;

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_successful_answer_is_recorded() {
        let history = Arc::new(RecordingHistory::default());
        let answer = use_case(Ok(TEXT.to_string()), history.clone())
            .execute(input(Some("alice")))
            .await;

        assert_eq!(answer.kind(), AnswerKind::Text);
        let records = history.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_id.as_str(), "alice");
        assert_eq!(records[0].question, "What is a SAFE?");
        assert_eq!(records[0].response, answer);
    }

    #[tokio::test]
    async fn test_anonymous_answer_is_not_recorded() {
        let history = Arc::new(RecordingHistory::default());
        let answer = use_case(Ok(TEXT.to_string()), history.clone())
            .execute(input(None))
            .await;

        assert_eq!(answer.kind(), AnswerKind::Text);
        assert!(history.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_error_answers_are_never_recorded() {
        let history = Arc::new(RecordingHistory::default());

        let provider_failure = use_case(Err(ProviderError::EmptyCompletion), history.clone())
            .execute(input(Some("alice")))
            .await;
        assert_eq!(provider_failure.error_code(), Some(ErrorCode::F02));

        let invalid_output = use_case(Ok("no json".to_string()), history.clone())
            .execute(input(Some("alice")))
            .await;
        assert_eq!(invalid_output.error_code(), Some(ErrorCode::Pv01));

        let model_error = use_case(
            Ok(r#"{"type":"error","message":"Off topic"}"#.to_string()),
            history.clone(),
        )
        .execute(input(Some("alice")))
        .await;
        assert_eq!(model_error.kind(), AnswerKind::Error);

        assert!(history.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_failure_is_swallowed() {
        let history = Arc::new(RecordingHistory {
            fail: true,
            ..Default::default()
        });
        let answer = use_case(Ok(TEXT.to_string()), history)
            .execute(input(Some("alice")))
            .await;

        assert_eq!(answer.kind(), AnswerKind::Text);
    }
}
