//! Messages produced by a team run.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a [`ChatMessage`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageKind {
    /// Plain text from the task or an agent
    TextMessage,
    /// An agent asked for one or more tools
    ToolCallRequestEvent,
    /// Tool results came back
    ToolCallExecutionEvent,
    /// Tool output handed on without reflection
    ToolCallSummaryMessage,
    /// The run stopped
    StopMessage,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::TextMessage => "TextMessage",
            MessageKind::ToolCallRequestEvent => "ToolCallRequestEvent",
            MessageKind::ToolCallExecutionEvent => "ToolCallExecutionEvent",
            MessageKind::ToolCallSummaryMessage => "ToolCallSummaryMessage",
            MessageKind::StopMessage => "StopMessage",
        }
    }

    /// Whether messages of this kind take part in speaker selection history.
    pub fn is_conversational(&self) -> bool {
        matches!(
            self,
            MessageKind::TextMessage | MessageKind::ToolCallSummaryMessage
        )
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in the team transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Agent name, or `user` for the task
    pub source: String,
    pub content: String,
    pub kind: MessageKind,
}

impl ChatMessage {
    pub fn new(source: impl Into<String>, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            source: source.into(),
            content: content.into(),
            kind,
        }
    }

    pub fn text(source: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(source, content, MessageKind::TextMessage)
    }

    pub fn stop(reason: impl Into<String>) -> Self {
        Self::new("system", reason, MessageKind::StopMessage)
    }
}

/// Terminal value of a team run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaskResult {
    pub messages: Vec<ChatMessage>,
    pub stop_reason: Option<String>,
}

/// An item of the team's event stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Message(ChatMessage),
    Finished(TaskResult),
}
