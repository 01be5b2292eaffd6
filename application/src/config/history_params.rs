//! History query parameters.

use serde::{Deserialize, Serialize};

/// Bounds for "list my history" queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryParams {
    /// Maximum number of records returned by a single query.
    pub max_records: usize,
}

impl Default for HistoryParams {
    fn default() -> Self {
        Self { max_records: 20 }
    }
}

impl HistoryParams {
    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = max;
        self
    }

    /// Clamp a caller-requested count to `1..=max_records`.
    ///
    /// `None` means "as many as allowed".
    pub fn effective_limit(&self, requested: Option<usize>) -> usize {
        let max = self.max_records.max(1);
        requested.unwrap_or(max).clamp(1, max)
    }
}
