//! JSONL file history store.

use super::connection::HistoryConnection;
use super::newest_first;
use async_trait::async_trait;
use docent_application::{HistoryError, HistoryStore};
use docent_domain::{QaExchange, UserId};
use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Append-only history file, one serialized [`QaExchange`] per line.
///
/// Appends are serialized through an async mutex. Lines that fail to parse
/// are skipped with a warning on read, so a torn write never hides the rest
/// of the file.
pub struct JsonlHistoryStore {
    connection: HistoryConnection,
    write_lock: Mutex<()>,
}

impl JsonlHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            connection: HistoryConnection::new(path),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.connection.path()
    }
}

/// True for an empty file or one whose last byte is `\n`.
async fn ends_with_newline(file: &mut fs::File) -> std::io::Result<bool> {
    if file.metadata().await?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1)).await?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last).await?;
    Ok(last[0] == b'\n')
}

#[async_trait]
impl HistoryStore for JsonlHistoryStore {
    async fn append(&self, exchange: &QaExchange) -> Result<(), HistoryError> {
        let path = self.connection.ensure_ready().await?;

        let mut line = serde_json::to_string(exchange)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new().read(true).append(true).open(path).await?;
        if !ends_with_newline(&mut file).await? {
            warn!("Terminating torn last line in {}", path.display());
            line.insert(0, '\n');
        }
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!(user = %exchange.user_id, "Appended history record");
        Ok(())
    }

    async fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<QaExchange>, HistoryError> {
        let path = self.connection.ensure_ready().await?;
        let contents = fs::read_to_string(path).await?;

        let mut matching = Vec::new();
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<QaExchange>(line) {
                Ok(exchange) if &exchange.user_id == user_id => matching.push(exchange),
                Ok(_) => {}
                Err(e) => warn!(
                    "Skipping malformed history line {} in {}: {}",
                    index + 1,
                    path.display(),
                    e
                ),
            }
        }

        Ok(newest_first(matching, limit))
    }
}
