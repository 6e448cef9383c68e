//! Console formatting for the team conversation and the tool catalogue

use colored::Colorize;
use eventcrew_domain::{ChatMessage, MessageKind, TaskResult, ToolDefinition};

/// Formats team output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One message, headed like a transcript entry.
    pub fn format_message(message: &ChatMessage) -> String {
        let title = format!("---------- {} ({}) ----------", message.kind, message.source);
        let title = match message.kind {
            MessageKind::TextMessage => title.cyan().bold(),
            MessageKind::ToolCallRequestEvent => title.yellow(),
            MessageKind::ToolCallExecutionEvent => title.yellow().dimmed(),
            MessageKind::ToolCallSummaryMessage => title.green(),
            MessageKind::StopMessage => title.magenta().bold(),
        };
        format!("{}\n{}\n", title, message.content)
    }

    pub fn format_result(result: &TaskResult) -> String {
        let reason = result.stop_reason.as_deref().unwrap_or("finished");
        format!(
            "\n{} {} ({} messages)\n",
            "Stopped:".bold(),
            reason,
            result.messages.len()
        )
    }

    /// Tool list with parameters; optional parameters show their default.
    pub fn format_tools(tools: &[&ToolDefinition]) -> String {
        if tools.is_empty() {
            return format!("{}\n", "No tools match".yellow());
        }

        let mut output = String::new();
        let mut domain = "";
        for tool in tools {
            if tool.domain() != domain {
                domain = tool.domain();
                output.push_str(&format!("\n{}\n", domain.cyan().bold()));
            }
            output.push_str(&format!("  {}\n", tool.name.bold()));
            output.push_str(&Self::indent(&tool.description, "      "));
            output.push('\n');
            for param in &tool.parameters {
                let note = match (&param.default, param.required) {
                    (_, true) => "required".to_string(),
                    (Some(default), false) => format!("default {}", default),
                    (None, false) => "optional".to_string(),
                };
                output.push_str(&format!(
                    "      - {} ({}, {})\n",
                    param.name,
                    param.param_type,
                    note.dimmed()
                ));
            }
        }
        output.push_str(&format!("\n{} tools\n", tools.len()));
        output
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
    use eventcrew_domain::ToolParameter;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_message_matches_transcript_heading() {
        plain();
        let text = ConsoleFormatter::format_message(&ChatMessage::text("user", "Plan a gala"));
        assert_eq!(text, "---------- TextMessage (user) ----------\nPlan a gala\n");
    }

    #[test]
    fn test_tools_grouped_by_domain() {
        plain();
        let venue = ToolDefinition::new("event_get_venue_suggestions", "Suggest venues")
            .with_parameter(ToolParameter::new("event_type", "Kind of event", true))
            .with_parameter(
                ToolParameter::new("capacity", "Guests", false)
                    .with_type("integer")
                    .with_default(50),
            );
        let plan = ToolDefinition::new("event_plan_event", "Plan an event");
        let budget = ToolDefinition::new("fundraising_calculate_budget", "Budget");

        let text = ConsoleFormatter::format_tools(&[&venue, &plan, &budget]);
        assert_eq!(text.matches("\nevent\n").count(), 1);
        assert!(text.contains("\nfundraising\n"));
        assert!(text.contains("      - event_type (string, required)\n"));
        assert!(text.contains("      - capacity (integer, default 50)\n"));
        assert!(text.ends_with("\n3 tools\n"));
    }

    #[test]
    fn test_no_tools() {
        plain();
        assert_eq!(ConsoleFormatter::format_tools(&[]), "No tools match\n");
    }

    #[test]
    fn test_result_line() {
        plain();
        let result = TaskResult {
            messages: vec![ChatMessage::text("user", "x")],
            stop_reason: Some("Text 'TERMINATE' mentioned".into()),
        };
        assert_eq!(
            ConsoleFormatter::format_result(&result),
            "\nStopped: Text 'TERMINATE' mentioned (1 messages)\n"
        );
    }
}
