//! Q&A history persistence
//!
//! - [`JsonlHistoryStore`]: append-only JSONL file, one exchange per line
//! - [`InMemoryHistoryStore`]: process-local store used when persistence is
//!   disabled

mod connection;
mod jsonl_store;
mod memory;

pub use connection::HistoryConnection;
pub use jsonl_store::JsonlHistoryStore;
pub use memory::InMemoryHistoryStore;

use docent_domain::QaExchange;

/// Newest first, at most `limit` records.
///
/// `exchanges` must be in insertion order; among equal timestamps the later
/// insertion wins.
fn newest_first(mut exchanges: Vec<QaExchange>, limit: usize) -> Vec<QaExchange> {
    exchanges.reverse();
    exchanges.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    exchanges.truncate(limit);
    exchanges
}
