//! Structural validation of raw provider output.
//!
//! Provider output is treated as untrusted text. Instead of deserializing
//! straight into [`StructuredAnswer`], every field is checked by hand against
//! a `serde_json::Value` so that a single bad sub-field degrades to a
//! documented fallback rather than failing the whole response.

use super::entities::{AnswerContext, ListItem, StructuredAnswer};
use super::error_code::ErrorCode;
use super::extract::extract;
use super::markdown::strip_bold;
use crate::provider::ProviderLabel;
use serde_json::{Map, Value};

/// Validate and normalize a raw provider reply.
///
/// Never fails: malformed input yields a [`StructuredAnswer::Error`] carrying
/// a `PV0x` [`ErrorCode`] and the label of the provider that produced it.
///
/// ```
/// use docent_domain::{validate, AnswerKind, ErrorCode, ProviderLabel};
///
/// let answer = validate("not json at all", ProviderLabel::Primary);
/// assert_eq!(answer.kind(), AnswerKind::Error);
/// assert_eq!(answer.error_code(), Some(ErrorCode::Pv01));
/// ```
pub fn validate(raw: &str, provider: ProviderLabel) -> StructuredAnswer {
    let candidate = extract(raw.trim());

    let value: Value = match serde_json::from_str(candidate) {
        Ok(value) => value,
        Err(_) => {
            return StructuredAnswer::failure(
                ErrorCode::Pv01,
                format!(
                    "The {} provider returned a response that could not be parsed as JSON.",
                    provider
                ),
                Some(provider),
            );
        }
    };

    let Some(object) = value.as_object() else {
        return missing_type(provider);
    };
    let Some(kind) = object.get("type").and_then(Value::as_str) else {
        return missing_type(provider);
    };

    match kind {
        "text" => validate_text(object, provider),
        "list" => validate_list(object, provider),
        "error" => validate_error(object, provider),
        other => StructuredAnswer::failure(
            ErrorCode::Pv06,
            format!(
                "The {} provider returned an unrecognized response type '{}'.",
                provider, other
            ),
            Some(provider),
        ),
    }
}

fn missing_type(provider: ProviderLabel) -> StructuredAnswer {
    StructuredAnswer::failure(
        ErrorCode::Pv02,
        format!(
            "The {} provider returned a response without a valid 'type' field.",
            provider
        ),
        Some(provider),
    )
}

fn validate_text(object: &Map<String, Value>, provider: ProviderLabel) -> StructuredAnswer {
    match object.get("answer").and_then(Value::as_str) {
        Some(answer) => StructuredAnswer::text(strip_bold(answer), context(object, provider)),
        None => StructuredAnswer::failure(
            ErrorCode::Pv03,
            format!(
                "The {} provider returned a text response without a valid 'answer' field.",
                provider
            ),
            Some(provider),
        ),
    }
}

fn validate_list(object: &Map<String, Value>, provider: ProviderLabel) -> StructuredAnswer {
    let title = object.get("title").and_then(Value::as_str);
    let items = object.get("items").and_then(Value::as_array);

    let (Some(title), Some(items)) = (title, items) else {
        return StructuredAnswer::failure(
            ErrorCode::Pv04,
            format!(
                "The {} provider returned a list response without a valid 'title' and 'items'.",
                provider
            ),
            Some(provider),
        );
    };

    let items = items.iter().map(coerce_item).collect();
    StructuredAnswer::list(strip_bold(title), items, context(object, provider))
}

fn validate_error(object: &Map<String, Value>, provider: ProviderLabel) -> StructuredAnswer {
    match object.get("message").and_then(Value::as_str) {
        Some(message) => StructuredAnswer::Error {
            message: message.to_string(),
            code: None,
            provider: Some(provider),
        },
        None => StructuredAnswer::failure(
            ErrorCode::Pv05,
            format!(
                "The {} provider returned an error response without a valid 'message' field.",
                provider
            ),
            Some(provider),
        ),
    }
}

/// Bad items degrade to placeholders instead of failing the list.
fn coerce_item(item: &Value) -> ListItem {
    let Some(fields) = item.as_object() else {
        return ListItem::invalid();
    };
    let field = |name: &str| {
        fields
            .get(name)
            .and_then(Value::as_str)
            .map(strip_bold)
            .unwrap_or_else(|| ListItem::MISSING.to_string())
    };
    ListItem::new(field("point"), field("detail"))
}

fn context(object: &Map<String, Value>, provider: ProviderLabel) -> AnswerContext {
    let optional_string = |name: &str| object.get(name).and_then(Value::as_str).map(str::to_string);

    AnswerContext {
        // Non-string, non-null values are coerced to None
        follow_up: object.get("follow_up").and_then(Value::as_str).map(strip_bold),
        source_section_id: optional_string("source_section_id"),
        source_section_title: optional_string("source_section_title"),
        provider: Some(provider),
    }
}
