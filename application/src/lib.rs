//! Application layer for docent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::HistoryParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    history_store::{HistoryError, HistoryStore},
    knowledge_source::{KnowledgeSource, StaticKnowledge},
    llm_provider::{LlmProvider, ProviderError},
    progress::{AnswerProgressNotifier, NoAnswerProgress},
};
pub use use_cases::answer_question::AnswerQuestionUseCase;
pub use use_cases::ask_question::{AskQuestionInput, AskQuestionUseCase};
pub use use_cases::list_history::ListHistoryUseCase;
