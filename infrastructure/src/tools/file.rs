//! File system tool: file_read

use async_trait::async_trait;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_domain::{ToolCall, ToolDefinition, ToolParameter};
use std::io::ErrorKind;
use tracing::debug;

pub const READ: &str = "file_read";

pub struct Read;

#[async_trait]
impl ToolHandler for Read {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(READ, "Read file contents")
            .with_parameter(ToolParameter::new("path", "File path to read", true).with_type("path"))
    }

    async fn handle(&self, call: &ToolCall, _ctx: &ToolContext) -> String {
        let path = call.string_or("path", "");

        match tokio::fs::read_to_string(path).await {
            Ok(content) => {
                debug!("Read {} bytes from {}", content.len(), path);
                format!("File System: Read file '{}':\n\n{}", path, content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                format!("File System: File '{}' not found.", path)
            }
            Err(e) => format!("File System: Error reading file '{}': {}", path, e),
        }
    }
}
