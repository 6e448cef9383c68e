//! Application layer for eventcrew
//!
//! This crate contains use cases, services, port definitions, and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod services;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_SELECTOR_PROMPT, TeamParams};
pub use ports::{
    composite_observer::CompositeObserver,
    conversation_observer::{
        ConversationObserver, NoConversationObserver, TranscriptError, TranscriptSink,
    },
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    spreadsheet::{SheetsError, SpreadsheetGateway},
    tool_executor::ToolExecutorPort,
    tool_handler::{ToolContext, ToolHandler},
    tool_schema::ToolSchemaPort,
    user_input::{InputError, UserInputPort},
};
pub use services::DataFetcher;
pub use use_cases::resolve_agent_tools::{Agent, ResolveAgentToolsUseCase};
pub use use_cases::run_team::{RunTeamError, RunTeamInput, RunTeamUseCase};
