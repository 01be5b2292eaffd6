//! Domain layer for docent
//!
//! This crate contains the answer schema, the provider-output extractor and
//! validator, and the value objects shared by every other layer.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## StructuredAnswer
//!
//! Every question resolves to exactly one [`StructuredAnswer`]:
//!
//! - **Text**: a prose answer
//! - **List**: a titled list of `{point, detail}` items
//! - **Error**: a failure message tagged with a stable [`ErrorCode`]
//!
//! ## Validation
//!
//! Provider output is untrusted text. [`validate`] turns any string into a
//! `StructuredAnswer` without ever failing, degrading malformed fields
//! instead of rejecting the whole payload where possible.

pub mod answer;
pub mod config;
pub mod core;
pub mod history;
pub mod knowledge;
pub mod prompt;
pub mod provider;

// Re-export commonly used types
pub use answer::{
    AnswerContext, AnswerKind, ErrorCode, ListItem, StructuredAnswer, extract, strip_bold,
    validate,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{error::DomainError, question::Question, string::truncate_chars};
pub use history::{QaExchange, UserId};
pub use knowledge::KnowledgeDocument;
pub use prompt::AnswerPromptTemplate;
pub use provider::{AttemptOutcome, ProviderAttempt, ProviderLabel};
