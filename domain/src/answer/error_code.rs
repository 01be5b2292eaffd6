//! Stable short codes identifying which stage produced an error answer.

use serde::{Deserialize, Serialize};

/// Error code embedded in every pipeline-generated [`StructuredAnswer::Error`].
///
/// Codes are part of the wire contract and must never be renumbered.
///
/// [`StructuredAnswer::Error`]: super::StructuredAnswer::Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// No provider credential configured at all.
    #[serde(rename = "CFG00")]
    Cfg00,
    /// Knowledge document unavailable or empty.
    #[serde(rename = "CFG02")]
    Cfg02,
    /// Primary and secondary providers both failed.
    #[serde(rename = "F01")]
    F01,
    /// Primary failed and no secondary is configured.
    #[serde(rename = "F02")]
    F02,
    /// Output is not parseable JSON.
    #[serde(rename = "PV01")]
    Pv01,
    /// Output is not an object or has no string `type`.
    #[serde(rename = "PV02")]
    Pv02,
    /// `text` response without a string `answer`.
    #[serde(rename = "PV03")]
    Pv03,
    /// `list` response without a string `title` or an `items` array.
    #[serde(rename = "PV04")]
    Pv04,
    /// `error` response without a string `message`.
    #[serde(rename = "PV05")]
    Pv05,
    /// Unrecognized `type` discriminant.
    #[serde(rename = "PV06")]
    Pv06,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Cfg00 => "CFG00",
            ErrorCode::Cfg02 => "CFG02",
            ErrorCode::F01 => "F01",
            ErrorCode::F02 => "F02",
            ErrorCode::Pv01 => "PV01",
            ErrorCode::Pv02 => "PV02",
            ErrorCode::Pv03 => "PV03",
            ErrorCode::Pv04 => "PV04",
            ErrorCode::Pv05 => "PV05",
            ErrorCode::Pv06 => "PV06",
        }
    }

    /// Configuration failure detected before any provider call.
    pub fn is_config(&self) -> bool {
        matches!(self, ErrorCode::Cfg00 | ErrorCode::Cfg02)
    }

    /// Provider output failed structural validation.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ErrorCode::Pv01
                | ErrorCode::Pv02
                | ErrorCode::Pv03
                | ErrorCode::Pv04
                | ErrorCode::Pv05
                | ErrorCode::Pv06
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_uses_short_code() {
        assert_eq!(serde_json::to_string(&ErrorCode::Pv01).unwrap(), "\"PV01\"");
        let code: ErrorCode = serde_json::from_str("\"CFG02\"").unwrap();
        assert_eq!(code, ErrorCode::Cfg02);
    }

    #[test]
    fn test_display_matches_serde() {
        for code in [ErrorCode::Cfg00, ErrorCode::F01, ErrorCode::F02, ErrorCode::Pv06] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code));
        }
    }

    #[test]
    fn test_families() {
        assert!(ErrorCode::Cfg00.is_config());
        assert!(!ErrorCode::F01.is_config());
        assert!(ErrorCode::Pv04.is_validation());
        assert!(!ErrorCode::F02.is_validation());
    }
}
