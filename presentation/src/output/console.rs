//! Console output formatter for answers and history

use colored::Colorize;
use docent_domain::{AnswerContext, QaExchange, StructuredAnswer};

/// Formats answers for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Enable or disable ANSI colors for all subsequent output
    pub fn set_color(enabled: bool) {
        colored::control::set_override(enabled);
    }

    /// Format a single answer
    pub fn format_answer(answer: &StructuredAnswer) -> String {
        let mut output = String::new();

        match answer {
            StructuredAnswer::Text { answer, context } => {
                output.push_str(answer);
                output.push('\n');
                output.push_str(&Self::context_footer(context));
            }
            StructuredAnswer::List {
                title,
                items,
                context,
            } => {
                output.push_str(&format!("{}\n", title.cyan().bold()));
                for (i, item) in items.iter().enumerate() {
                    output.push_str(&format!(
                        "  {}. {} {}\n",
                        i + 1,
                        item.point.bold(),
                        Self::indent_tail(&item.detail, "     ")
                    ));
                }
                output.push_str(&Self::context_footer(context));
            }
            StructuredAnswer::Error {
                message,
                code,
                provider,
            } => {
                let label = match code {
                    Some(code) => format!("Error [{}]:", code),
                    None => "Error:".to_string(),
                };
                output.push_str(&format!("{} {}\n", label.red().bold(), message));
                if let Some(provider) = provider {
                    output.push_str(&format!("{}\n", format!("via {} provider", provider).dimmed()));
                }
            }
        }

        output
    }

    /// Format as JSON (same shape as the HTTP API)
    pub fn format_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format a user's history, newest first
    pub fn format_history(records: &[QaExchange]) -> String {
        if records.is_empty() {
            return format!("{}\n", "No history yet.".dimmed());
        }

        let mut output = String::new();
        for record in records {
            output.push_str(&format!(
                "{} {}\n",
                record
                    .timestamp
                    .format("%Y-%m-%d %H:%M:%S UTC")
                    .to_string()
                    .dimmed(),
                format!("Q: {}", record.question).bold()
            ));
            output.push_str(&Self::indent(
                Self::format_answer(&record.response).trim_end(),
                "  ",
            ));
            output.push_str("\n\n");
        }
        output
    }

    fn context_footer(context: &AnswerContext) -> String {
        let mut footer = String::new();

        let source = match (&context.source_section_id, &context.source_section_title) {
            (Some(id), Some(title)) => Some(format!("{} {}", id, title)),
            (Some(id), None) => Some(id.clone()),
            (None, Some(title)) => Some(title.clone()),
            (None, None) => None,
        };
        if let Some(source) = source {
            footer.push_str(&format!("{} {}\n", "Source:".dimmed(), source));
        }
        if let Some(follow_up) = &context.follow_up {
            footer.push_str(&format!("{} {}\n", "Next:".yellow(), follow_up));
        }
        if let Some(provider) = context.provider {
            footer.push_str(&format!("{}\n", format!("via {} provider", provider).dimmed()));
        }

        if footer.is_empty() {
            footer
        } else {
            format!("\n{}", footer)
        }
    }

    /// Indent continuation lines only
    fn indent_tail(text: &str, prefix: &str) -> String {
        text.lines()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 {
                    line.to_string()
                } else {
                    format!("\n{}{}", prefix, line)
                }
            })
            .collect()
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use docent_domain::{ErrorCode, ListItem, ProviderLabel, UserId};

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_text_answer_with_source_and_follow_up() {
        plain();
        let answer = StructuredAnswer::text(
            "A SAFE is a Simple Agreement for Future Equity.",
            AnswerContext {
                follow_up: Some("What is a valuation cap?".to_string()),
                source_section_id: Some("1.1".to_string()),
                source_section_title: Some("Definitions".to_string()),
                provider: Some(ProviderLabel::Secondary),
            },
        );
        let output = ConsoleFormatter::format_answer(&answer);
        assert!(output.starts_with("A SAFE is a Simple Agreement for Future Equity.\n"));
        assert!(output.contains("Source: 1.1 Definitions"));
        assert!(output.contains("Next: What is a valuation cap?"));
        assert!(output.contains("via secondary provider"));
    }

    #[test]
    fn test_list_answer_is_numbered() {
        plain();
        let answer = StructuredAnswer::list(
            "Tips",
            vec![
                ListItem::new("Plan", "Plan ahead"),
                ListItem::new("Review", "Read twice\nthen sign"),
            ],
            AnswerContext::default(),
        );
        let output = ConsoleFormatter::format_answer(&answer);
        assert!(output.starts_with("Tips\n"));
        assert!(output.contains("  1. Plan Plan ahead\n"));
        assert!(output.contains("  2. Review Read twice\n     then sign\n"));
        assert!(!output.contains("Source:"));
    }

    #[test]
    fn test_error_answer_shows_code() {
        plain();
        let answer = StructuredAnswer::failure(
            ErrorCode::F01,
            "All providers failed.",
            None,
        );
        assert_eq!(
            ConsoleFormatter::format_answer(&answer),
            "Error [F01]: All providers failed.\n"
        );

        let model_error = StructuredAnswer::Error {
            message: "Out of scope".to_string(),
            code: None,
            provider: Some(ProviderLabel::Primary),
        };
        let output = ConsoleFormatter::format_answer(&model_error);
        assert!(output.starts_with("Error: Out of scope\n"));
        assert!(output.contains("via primary provider"));
    }

    #[test]
    fn test_json_matches_wire_shape() {
        let answer = StructuredAnswer::failure(ErrorCode::Cfg02, "No document", None);
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&answer)).unwrap();
        assert_eq!(json["type"], "error");
        assert_eq!(json["code"], "CFG02");
    }

    #[test]
    fn test_history() {
        plain();
        assert!(ConsoleFormatter::format_history(&[]).contains("No history yet."));

        let record = QaExchange::record(
            UserId::try_new("alice").unwrap(),
            "What is a SAFE?",
            StructuredAnswer::text("An agreement.", AnswerContext::default()),
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
        )
        .unwrap();
        let output = ConsoleFormatter::format_history(&[record]);
        assert!(output.contains("2026-03-01 09:30:00 UTC Q: What is a SAFE?"));
        assert!(output.contains("  An agreement."));
    }
}
