//! Configuration issues detected at startup.
//!
//! The loader reports every problem it finds at once instead of stopping at
//! the first one. Callers abort on [`Severity::Error`] and log warnings.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A string field that must not be empty is empty.
    EmptyValue { field: String },
    /// A numeric field that must be positive is zero.
    ZeroValue { field: String },
    /// A field holds a value that cannot be parsed.
    InvalidValue { field: String, value: String },
    /// No provider has a credential; every question will fail with CFG00.
    NoCredentials,
    /// The knowledge document path is unset or unreadable.
    KnowledgeUnavailable { path: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_severity() {
        let e = ConfigIssue::error(
            ConfigIssueCode::ZeroValue {
                field: "history.limit".to_string(),
            },
            "history.limit must be positive",
        );
        assert!(e.is_error());

        let w = ConfigIssue::warning(ConfigIssueCode::NoCredentials, "no keys");
        assert!(!w.is_error());
        assert_eq!(w.code, ConfigIssueCode::NoCredentials);
    }
}
