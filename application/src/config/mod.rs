//! Application-level configuration.
//!
//! - [`HistoryParams`]: bounds for history queries

pub mod history_params;

pub use history_params::HistoryParams;
