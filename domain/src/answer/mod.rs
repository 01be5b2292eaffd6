//! Answer subdomain: the response schema and the pipeline that turns raw
//! provider output into it.
//!
//! | Step | Function | Failure mode |
//! |------|----------|--------------|
//! | Unwrap code fences | [`extract`] | none (pass-through) |
//! | Strip bold emphasis | [`strip_bold`] | none |
//! | Structural checks | [`validate`] | `Error` answer with a `PV0x` code |

pub mod entities;
pub mod error_code;
pub mod extract;
pub mod markdown;
pub mod validation;

pub use entities::{AnswerContext, AnswerKind, ListItem, StructuredAnswer};
pub use error_code::ErrorCode;
pub use extract::extract;
pub use markdown::strip_bold;
pub use validation::validate;
