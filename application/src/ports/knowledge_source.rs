//! Knowledge source port
//!
//! Supplies the knowledge document. Implementations load it once; every
//! request reads the same shared text.

use docent_domain::KnowledgeDocument;

/// Read-only access to the knowledge document
pub trait KnowledgeSource: Send + Sync {
    /// The current document. An empty document means "unavailable".
    fn document(&self) -> KnowledgeDocument;
}

/// A document held in memory
pub struct StaticKnowledge {
    document: KnowledgeDocument,
}

impl StaticKnowledge {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            document: KnowledgeDocument::new(text.into()),
        }
    }
}

impl KnowledgeSource for StaticKnowledge {
    fn document(&self) -> KnowledgeDocument {
        self.document.clone()
    }
}
