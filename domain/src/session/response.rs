//! LLM response types for native tool calling.
//!
//! A completion may mix text with tool requests. The team engine executes
//! the requested tools and feeds the results back as `Role::Tool` messages.

use crate::tool::entities::ToolCall;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of content within an LLM response.
///
/// ```
/// use eventcrew_domain::session::response::ContentBlock;
///
/// let text = ContentBlock::Text("Checking the venue list.".to_string());
/// assert!(text.as_text().is_some());
///
/// let tool = ContentBlock::ToolUse {
///     id: "call_abc123".to_string(),
///     name: "event_get_venue_suggestions".to_string(),
///     input: [("event_type".to_string(), serde_json::json!("party"))]
///         .into_iter().collect(),
/// };
/// assert!(tool.as_tool_use().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// A text content block from the model.
    Text(String),

    /// A tool use request from the model.
    ToolUse {
        /// Provider-assigned id for correlating the result.
        id: String,
        name: String,
        input: HashMap<String, serde_json::Value>,
    },
}

impl ContentBlock {
    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &HashMap<String, serde_json::Value>)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response; the model is done.
    EndTurn,
    /// The model wants to call tools.
    ToolUse,
    /// Hit the token limit; response may be truncated.
    MaxTokens,
    /// Provider-specific stop reason.
    Other(String),
}

/// A structured response from an LLM, supporting both text and tool use.
///
/// ```
/// use eventcrew_domain::session::response::{LlmResponse, ContentBlock, StopReason};
///
/// let response = LlmResponse::from_text("event_coordinator");
/// assert_eq!(response.text_content(), "event_coordinator");
/// assert!(!response.has_tool_calls());
///
/// let response = LlmResponse {
///     content: vec![ContentBlock::ToolUse {
///         id: "call_1".to_string(),
///         name: "db_query".to_string(),
///         input: [("query".to_string(), serde_json::json!("SELECT 1"))]
///             .into_iter().collect(),
///     }],
///     stop_reason: Some(StopReason::ToolUse),
///     model: Some("gpt-4o".to_string()),
/// };
/// assert_eq!(response.tool_calls().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    /// Content blocks in the response (text and/or tool use).
    pub content: Vec<ContentBlock>,
    /// Why the model stopped generating.
    pub stop_reason: Option<StopReason>,
    /// Model identifier (if returned by the API).
    pub model: Option<String>,
}

impl LlmResponse {
    /// Create a text-only response.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentBlock::Text(text.into())],
            stop_reason: Some(StopReason::EndTurn),
            model: None,
        }
    }

    /// Concatenate all `Text` content blocks into a single string.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all `ToolUse` content blocks as `Vec<ToolCall>`.
    ///
    /// Each call carries the provider id in `native_id`.
    pub fn tool_calls(&self) -> Vec<ToolCall> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => Some(
                    ToolCall::new(name.as_str())
                        .with_arguments(input.clone())
                        .with_native_id(id.as_str()),
                ),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` if the response contains any tool use requests.
    pub fn has_tool_calls(&self) -> bool {
        self.content
            .iter()
            .any(|b| matches!(b, ContentBlock::ToolUse { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_creates_text_only_response() {
        let response = LlmResponse::from_text("Hello, world!");
        assert_eq!(response.text_content(), "Hello, world!");
        assert!(!response.has_tool_calls());
        assert!(response.tool_calls().is_empty());
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.model, None);
    }

    #[test]
    fn tool_calls_extraction() {
        let response = LlmResponse {
            content: vec![
                ContentBlock::Text("Let me check the sheet.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_abc123".to_string(),
                    name: "sheets_read_data".to_string(),
                    input: [
                        ("spreadsheet_id".to_string(), serde_json::json!("abc")),
                        ("range_name".to_string(), serde_json::json!("Guests!A1:C20")),
                    ]
                    .into_iter()
                    .collect(),
                },
                ContentBlock::Text(" And the budget.".to_string()),
                ContentBlock::ToolUse {
                    id: "call_def456".to_string(),
                    name: "fundraising_calculate_budget".to_string(),
                    input: [
                        ("venue_cost".to_string(), serde_json::json!(1000)),
                        ("catering_cost".to_string(), serde_json::json!(500)),
                    ]
                    .into_iter()
                    .collect(),
                },
            ],
            stop_reason: Some(StopReason::ToolUse),
            model: Some("gpt-4o".to_string()),
        };

        assert!(response.has_tool_calls());
        assert_eq!(
            response.text_content(),
            "Let me check the sheet. And the budget."
        );

        let calls = response.tool_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].tool_name, "sheets_read_data");
        assert_eq!(calls[0].native_id, Some("call_abc123".to_string()));
        assert_eq!(calls[0].get_string("range_name"), Some("Guests!A1:C20"));
        assert_eq!(calls[1].native_id, Some("call_def456".to_string()));
        assert_eq!(calls[1].get_f64("venue_cost"), Some(1000.0));
    }

    #[test]
    fn empty_response() {
        let response = LlmResponse {
            content: vec![],
            stop_reason: None,
            model: None,
        };

        assert_eq!(response.text_content(), "");
        assert!(!response.has_tool_calls());
    }

    #[test]
    fn content_block_accessors() {
        let tool = ContentBlock::ToolUse {
            id: "id1".to_string(),
            name: "file_read".to_string(),
            input: HashMap::new(),
        };
        assert!(tool.as_text().is_none());
        let (id, name, input) = tool.as_tool_use().unwrap();
        assert_eq!(id, "id1");
        assert_eq!(name, "file_read");
        assert!(input.is_empty());
    }
}
