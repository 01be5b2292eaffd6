//! Use cases (application services)

pub mod answer_question;
pub mod ask_question;
pub mod list_history;
