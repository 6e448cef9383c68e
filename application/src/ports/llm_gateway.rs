//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use eventcrew_domain::{LlmResponse, Message};
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Gateway closed")]
    Closed,

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion request: role-tagged history plus the tools the model may call.
#[derive(Debug, Clone, Default)]
pub struct CompletionRequest {
    pub messages: Vec<Message>,
    /// Provider-neutral JSON schemas (see [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort))
    pub tools: Vec<serde_json::Value>,
}

impl CompletionRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<serde_json::Value>) -> Self {
        self.tools = tools;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Request a single completion
    async fn complete(&self, request: CompletionRequest) -> Result<LlmResponse, GatewayError>;

    /// Release the underlying client. Further calls fail with [`GatewayError::Closed`].
    async fn close(&self) -> Result<(), GatewayError> {
        Ok(())
    }
}
