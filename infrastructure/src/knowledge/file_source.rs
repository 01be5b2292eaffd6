//! Local file system knowledge source
//!
//! Reads the knowledge document once at startup. A missing or unreadable
//! file is not fatal: the source serves an empty document and every question
//! is answered with a CFG02 error until the file is fixed and the process
//! restarted.

use docent_application::KnowledgeSource;
use docent_domain::KnowledgeDocument;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Knowledge source backed by a UTF-8 text file.
#[derive(Debug, Clone)]
pub struct FileKnowledgeSource {
    path: Option<PathBuf>,
    document: KnowledgeDocument,
}

/// Errors that can occur while reading the knowledge document
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Could not read knowledge document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Knowledge document {0} is empty")]
    Empty(PathBuf),
}

impl FileKnowledgeSource {
    /// Read the document at `path`, failing if it is unreadable or blank.
    pub fn try_load(path: &Path) -> Result<Self, KnowledgeError> {
        let text = fs::read_to_string(path).map_err(|source| KnowledgeError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = KnowledgeDocument::new(text);
        if !document.is_available() {
            return Err(KnowledgeError::Empty(path.to_path_buf()));
        }

        info!(
            path = %path.display(),
            chars = document.char_count(),
            "Loaded knowledge document"
        );
        Ok(Self {
            path: Some(path.to_path_buf()),
            document,
        })
    }

    /// Load the document at `path`, degrading to an empty document on any
    /// failure or when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            warn!("No knowledge document configured (knowledge.path)");
            return Self::unavailable(None);
        };

        Self::try_load(path).unwrap_or_else(|e| {
            warn!("{}", e);
            Self::unavailable(Some(path))
        })
    }

    fn unavailable(path: Option<&Path>) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            document: KnowledgeDocument::empty(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl KnowledgeSource for FileKnowledgeSource {
    fn document(&self) -> KnowledgeDocument {
        debug!(available = self.document.is_available(), "Serving knowledge document");
        self.document.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loads_file_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("primer.md");
        fs::write(&path, "# SAFEs\n\nSection 1: Valuation caps.").unwrap();

        let source = FileKnowledgeSource::load(Some(&path));
        let document = source.document();
        assert!(document.is_available());
        assert!(document.text().contains("Valuation caps"));
        assert_eq!(source.path(), Some(path.as_path()));
    }

    #[test]
    fn test_missing_file_serves_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileKnowledgeSource::load(Some(&dir.path().join("absent.md")));
        assert!(!source.document().is_available());
    }

    #[test]
    fn test_unconfigured_path_serves_empty_document() {
        let source = FileKnowledgeSource::load(None);
        assert!(source.path().is_none());
        assert!(!source.document().is_available());
    }

    #[test]
    fn test_try_load_reports_cause() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.md");
        assert!(matches!(
            FileKnowledgeSource::try_load(&missing),
            Err(KnowledgeError::Read { .. })
        ));

        let blank = dir.path().join("blank.md");
        fs::write(&blank, "\n").unwrap();
        assert!(matches!(
            FileKnowledgeSource::try_load(&blank),
            Err(KnowledgeError::Empty(_))
        ));
    }

    #[test]
    fn test_whitespace_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.md");
        fs::write(&path, "  \n\n").unwrap();
        assert!(!FileKnowledgeSource::load(Some(&path)).document().is_available());
    }
}
