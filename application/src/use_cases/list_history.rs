//! List History use case.

use crate::config::HistoryParams;
use crate::ports::history_store::{HistoryError, HistoryStore};
use docent_domain::{QaExchange, UserId};
use std::sync::Arc;
use tracing::debug;

/// Use case for reading a user's past exchanges, newest first.
#[derive(Clone)]
pub struct ListHistoryUseCase {
    history: Arc<dyn HistoryStore>,
    params: HistoryParams,
}

impl ListHistoryUseCase {
    pub fn new(history: Arc<dyn HistoryStore>) -> Self {
        Self {
            history,
            params: HistoryParams::default(),
        }
    }

    pub fn with_params(mut self, params: HistoryParams) -> Self {
        self.params = params;
        self
    }

    /// Fetch up to `requested` records (clamped to the configured maximum).
    pub async fn execute(
        &self,
        user_id: &UserId,
        requested: Option<usize>,
    ) -> Result<Vec<QaExchange>, HistoryError> {
        let limit = self.params.effective_limit(requested);
        let records = self.history.recent(user_id, limit).await?;
        debug!(user = %user_id, limit, found = records.len(), "Loaded history");
        Ok(records)
    }
}
