//! Presentation layer for docent
//!
//! This crate contains CLI definitions, output formatters, the progress
//! spinner, and the HTTP API routes.

pub mod cli;
pub mod output;
pub mod progress;
pub mod server;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use progress::spinner::AnswerSpinner;
pub use server::{AppState, ServerError};
