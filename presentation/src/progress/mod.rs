//! Progress reporting while a question is answered

pub mod spinner;
