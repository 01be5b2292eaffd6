//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod conversation_logger;
pub mod history_store;
pub mod knowledge_source;
pub mod llm_provider;
pub mod progress;
