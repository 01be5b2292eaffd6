//! History configuration (`[history]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    /// Persist exchanges to disk. When false, history lives in memory only.
    pub enabled: bool,
    /// JSONL file path (default: `<data dir>/docent/history.jsonl`).
    pub path: Option<PathBuf>,
    /// Maximum records returned by a history query.
    pub limit: usize,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
            limit: 20,
        }
    }
}

impl FileHistoryConfig {
    /// Configured path, or the platform data directory default.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join("docent").join("history.jsonl")))
    }
}
