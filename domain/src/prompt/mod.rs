//! Prompt domain
//!
//! Templates for the instructions sent to every provider.

mod template;

pub use template::AnswerPromptTemplate;
