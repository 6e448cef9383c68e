//! Domain layer for eventcrew
//!
//! This crate contains the core types of the tool registry and the agent
//! team. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools and domains
//!
//! Every tool is named `<domain>_<action>`. Agents declare the domains they
//! may use as [`DomainPattern`]s; the [`DomainRouter`] turns those patterns
//! into the tool set each agent is offered.
//!
//! ## Sheets and synthesis
//!
//! Spreadsheet reads produce a [`SheetTable`]; the [`synthesis`] helpers
//! render tables, checklists and amounts into deterministic text.
//!
//! ## Conversation
//!
//! A team run streams [`ChatEvent`]s and stops when its
//! [`TerminationCondition`] is met.

pub mod agent;
pub mod conversation;
pub mod core;
pub mod session;
pub mod sheet;
pub mod synthesis;
pub mod tool;

// Re-export commonly used types
pub use agent::AgentProfile;
pub use conversation::{
    ChatEvent, ChatMessage, DEFAULT_MAX_MESSAGES, DEFAULT_TERMINATION_TOKEN, MessageKind,
    TaskResult, TerminationCondition,
};
pub use core::error::DomainError;
pub use session::{
    entities::{Message, Role},
    response::{ContentBlock, LlmResponse, StopReason},
};
pub use sheet::{
    DocumentSummary, SampleRead, SheetRead, SheetTable, SpreadsheetMetadata, WorksheetInfo,
    WorksheetOverview,
};
pub use synthesis::{TableLayout, TableRenderer};
pub use tool::{
    DefaultToolValidator, DomainPattern, DomainRouter, TOOL_NAME_SEPARATOR, ToolCall,
    ToolDefinition, ToolError, ToolParameter, ToolResult, ToolResultMetadata, ToolSpec,
    ToolValidator, WILDCARD_MARKER,
};
