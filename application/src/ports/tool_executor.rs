//! Tool Executor port
//!
//! Defines the interface for dispatching tool calls by name.

use async_trait::async_trait;
use eventcrew_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};
use serde_json::Value;
use std::collections::HashMap;

/// Port for tool execution
///
/// This port defines how the application layer executes tools.
/// Implementations (adapters) live in the infrastructure layer.
///
/// `execute` never fails: an unknown tool or a missing argument comes back
/// as a failed [`ToolResult`] whose text explains the problem.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Execute a tool call asynchronously
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Call a tool by name and return its text.
    async fn call_text(&self, name: &str, arguments: HashMap<String, Value>) -> String {
        let call = ToolCall::new(name).with_arguments(arguments);
        self.execute(&call).await.into_text()
    }
}
