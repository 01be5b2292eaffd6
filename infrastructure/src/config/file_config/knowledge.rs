//! Knowledge document configuration (`[knowledge]` section)

use docent_domain::KnowledgeDocument;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileKnowledgeConfig {
    /// Path of the knowledge document (plain text or markdown).
    pub path: Option<PathBuf>,
    /// Characters of the document sent to providers.
    pub max_chars: usize,
}

impl Default for FileKnowledgeConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_chars: KnowledgeDocument::DEFAULT_BUDGET_CHARS,
        }
    }
}
