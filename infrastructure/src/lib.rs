//! Infrastructure layer for docent
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: HTTP provider adapters, the knowledge file source,
//! history stores, the transcript logger, and configuration file loading.

pub mod config;
pub mod history;
pub mod knowledge;
pub mod logging;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use history::{HistoryConnection, InMemoryHistoryStore, JsonlHistoryStore};
pub use knowledge::{FileKnowledgeSource, KnowledgeError};
pub use logging::JsonlConversationLogger;
pub use providers::{AnthropicProvider, HttpProviderSettings, OpenAiProvider};
