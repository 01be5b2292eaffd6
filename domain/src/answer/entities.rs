//! StructuredAnswer and its parts.

use super::error_code::ErrorCode;
use crate::provider::ProviderLabel;
use serde::{Deserialize, Serialize};

/// Discriminant of a [`StructuredAnswer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Text,
    List,
    Error,
}

impl AnswerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKind::Text => "text",
            AnswerKind::List => "list",
            AnswerKind::Error => "error",
        }
    }
}

impl std::fmt::Display for AnswerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields shared by the `text` and `list` shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerContext {
    /// Suggested follow-up question, bold emphasis already stripped.
    pub follow_up: Option<String>,
    /// Identifier of the knowledge-document section the answer came from.
    pub source_section_id: Option<String>,
    /// Title of that section.
    pub source_section_title: Option<String>,
    /// Which provider produced the answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<ProviderLabel>,
}

/// One entry of a `list` answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub point: String,
    pub detail: String,
}

impl ListItem {
    /// Placeholder for a missing or non-string sub-field.
    pub const MISSING: &'static str = "N/A";
    /// Detail used when the whole item is not an object.
    pub const INVALID_DETAIL: &'static str = "Invalid item structure";

    pub fn new(point: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            point: point.into(),
            detail: detail.into(),
        }
    }

    /// Replacement for an item that is not an object at all.
    pub fn invalid() -> Self {
        Self::new(Self::MISSING, Self::INVALID_DETAIL)
    }
}

/// The single result type flowing through the answer pipeline.
///
/// Serialized with an internal `type` tag, matching the wire shape consumed
/// by the UI:
///
/// ```
/// use docent_domain::{AnswerContext, StructuredAnswer};
///
/// let answer = StructuredAnswer::text("42", AnswerContext::default());
/// let json = serde_json::to_value(&answer).unwrap();
/// assert_eq!(json["type"], "text");
/// assert_eq!(json["answer"], "42");
/// assert!(json["follow_up"].is_null());
/// ```
///
/// Values are built once (by the validator or the orchestrator) and only
/// read afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StructuredAnswer {
    Text {
        answer: String,
        #[serde(flatten)]
        context: AnswerContext,
    },
    List {
        title: String,
        items: Vec<ListItem>,
        #[serde(flatten)]
        context: AnswerContext,
    },
    Error {
        message: String,
        /// Pipeline stage that failed; absent when the model itself chose
        /// to answer with an error.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<ErrorCode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        provider: Option<ProviderLabel>,
    },
}

impl StructuredAnswer {
    pub fn text(answer: impl Into<String>, context: AnswerContext) -> Self {
        StructuredAnswer::Text {
            answer: answer.into(),
            context,
        }
    }

    pub fn list(title: impl Into<String>, items: Vec<ListItem>, context: AnswerContext) -> Self {
        StructuredAnswer::List {
            title: title.into(),
            items,
            context,
        }
    }

    /// Error generated by the pipeline itself.
    pub fn failure(
        code: ErrorCode,
        message: impl Into<String>,
        provider: Option<ProviderLabel>,
    ) -> Self {
        StructuredAnswer::Error {
            message: message.into(),
            code: Some(code),
            provider,
        }
    }

    pub fn kind(&self) -> AnswerKind {
        match self {
            StructuredAnswer::Text { .. } => AnswerKind::Text,
            StructuredAnswer::List { .. } => AnswerKind::List,
            StructuredAnswer::Error { .. } => AnswerKind::Error,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StructuredAnswer::Error { .. })
    }

    /// Provider that produced this answer, if any.
    pub fn provider(&self) -> Option<ProviderLabel> {
        match self {
            StructuredAnswer::Text { context, .. } | StructuredAnswer::List { context, .. } => {
                context.provider
            }
            StructuredAnswer::Error { provider, .. } => *provider,
        }
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            StructuredAnswer::Error { code, .. } => *code,
            _ => None,
        }
    }

    pub fn context(&self) -> Option<&AnswerContext> {
        match self {
            StructuredAnswer::Text { context, .. } | StructuredAnswer::List { context, .. } => {
                Some(context)
            }
            StructuredAnswer::Error { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_wire_shape() {
        let answer = StructuredAnswer::text(
            "A SAFE is a Simple Agreement for Future Equity.",
            AnswerContext {
                source_section_id: Some("1.2".to_string()),
                provider: Some(ProviderLabel::Primary),
                ..Default::default()
            },
        );
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "text",
                "answer": "A SAFE is a Simple Agreement for Future Equity.",
                "follow_up": null,
                "source_section_id": "1.2",
                "source_section_title": null,
                "provider": "primary"
            })
        );
    }

    #[test]
    fn test_list_wire_shape() {
        let answer = StructuredAnswer::list(
            "Tips",
            vec![ListItem::new("Plan", "Plan ahead")],
            AnswerContext::default(),
        );
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(value["type"], "list");
        assert_eq!(value["items"][0]["point"], "Plan");
        assert!(value.get("provider").is_none());
    }

    #[test]
    fn test_error_wire_shape() {
        let answer = StructuredAnswer::failure(
            ErrorCode::Pv01,
            "not json",
            Some(ProviderLabel::Secondary),
        );
        let value = serde_json::to_value(&answer).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "error",
                "message": "not json",
                "code": "PV01",
                "provider": "secondary"
            })
        );
    }

    #[test]
    fn test_deserialize_stored_answer() {
        let stored = json!({
            "type": "list",
            "title": "Steps",
            "items": [{"point": "a", "detail": "b"}],
            "follow_up": "Next?",
            "provider": "secondary"
        });
        let answer: StructuredAnswer = serde_json::from_value(stored).unwrap();
        assert_eq!(answer.kind(), AnswerKind::List);
        assert_eq!(answer.provider(), Some(ProviderLabel::Secondary));
        assert_eq!(
            answer.context().unwrap().follow_up.as_deref(),
            Some("Next?")
        );
        assert!(answer.context().unwrap().source_section_id.is_none());
    }

    #[test]
    fn test_accessors() {
        let err = StructuredAnswer::failure(ErrorCode::F01, "all failed", None);
        assert!(err.is_error());
        assert_eq!(err.error_code(), Some(ErrorCode::F01));
        assert_eq!(err.kind().to_string(), "error");
        assert!(err.context().is_none());
    }
}
