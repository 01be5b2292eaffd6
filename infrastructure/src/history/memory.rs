//! In-memory history store.

use super::newest_first;
use async_trait::async_trait;
use docent_application::{HistoryError, HistoryStore};
use docent_domain::{QaExchange, UserId};
use std::sync::Mutex;

/// History kept for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: Mutex<Vec<QaExchange>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, exchange: &QaExchange) -> Result<(), HistoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        records.push(exchange.clone());
        Ok(())
    }

    async fn recent(&self, user_id: &UserId, limit: usize) -> Result<Vec<QaExchange>, HistoryError> {
        let records = self
            .records
            .lock()
            .map_err(|_| HistoryError::Unavailable("history lock poisoned".to_string()))?;
        let matching = records
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect();
        Ok(newest_first(matching, limit))
    }
}
