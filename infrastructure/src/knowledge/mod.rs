//! Knowledge document loading.

mod file_source;

pub use file_source::{FileKnowledgeSource, KnowledgeError};
