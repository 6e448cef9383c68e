//! Infrastructure layer for eventcrew
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the Google Sheets client, the chat-completions
//! gateway, the tool handlers and their registry, operator input, run
//! records, configuration loading and the JSON-RPC tool server.

pub mod config;
pub mod input;
pub mod logging;
pub mod mcp;
pub mod openai;
pub mod sheets;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, PromptBook};
pub use input::{NoOperatorInput, StdinInput};
pub use logging::{JsonlEventLog, TranscriptFileWriter};
pub use mcp::{McpError, McpServer};
pub use openai::OpenAiChatGateway;
pub use sheets::{GoogleSheetsClient, UnconfiguredSheets};
pub use tools::{JsonSchemaToolConverter, ToolRegistry};
