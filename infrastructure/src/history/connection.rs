//! Lazily prepared history storage location.

use docent_application::HistoryError;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::sync::OnceCell;
use tracing::info;

/// Owns the history file path and prepares it on first use.
///
/// [`ensure_ready`](Self::ensure_ready) is called before every store
/// operation. The first successful call creates parent directories and the
/// file; later calls return immediately. A failed preparation is retried on
/// the next call.
#[derive(Debug)]
pub struct HistoryConnection {
    path: PathBuf,
    ready: OnceCell<()>,
}

impl HistoryConnection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ready: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ready(&self) -> bool {
        self.ready.initialized()
    }

    /// Prepare the storage location if that has not happened yet.
    pub async fn ensure_ready(&self) -> Result<&Path, HistoryError> {
        self.ready
            .get_or_try_init(|| async {
                if let Some(parent) = self.path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    fs::create_dir_all(parent).await?;
                }
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)
                    .await?;
                info!(path = %self.path.display(), "History store ready");
                Ok::<(), HistoryError>(())
            })
            .await?;
        Ok(&self.path)
    }
}
