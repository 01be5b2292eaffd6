//! Output formatting for answers and history

pub mod console;
