//! MCP-style tool server
//!
//! Exposes the tool registry over JSON-RPC 2.0 (`initialize`, `tools/list`,
//! `tools/call`, `ping`). [`McpServer`] does the dispatch; the stdio, HTTP
//! and SSE transports only move messages.

mod error;
mod http;
pub mod protocol;
mod server;
mod sse;
mod stdio;

pub use error::McpError;
pub use http::MCP_PATH;
pub use server::McpServer;
pub use sse::{MESSAGES_PATH, SSE_PATH};
