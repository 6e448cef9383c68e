//! Tool domain module
//!
//! Defines the tools agents can call and how they are scoped to agents.
//!
//! ```text
//! ┌──────────────┐   DomainPattern[]   ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │────────────────────▶│ DomainRouter │───▶│ scoped spec  │
//! │ (all tools)  │                     └──────────────┘    └──────┬───────┘
//! └──────────────┘                                                │
//!                                  ToolCall ──▶ registry ──▶ ToolResult
//! ```
//!
//! # Naming
//!
//! Tool names follow `<domain>_<action>` (`event_plan_event`,
//! `sheets_read_data`). The separator [`TOOL_NAME_SEPARATOR`] and the
//! wildcard marker [`WILDCARD_MARKER`] are fixed protocol constants:
//!
//! - `"event_"` is a **prefix** pattern (ends with the separator)
//! - `"sheets*"` / `"*"` are **wildcard** patterns (marker stripped, then prefix)
//! - anything else is an **exact** name
//!
//! # Key Types
//!
//! - [`ToolSpec`]: name-ordered set of [`ToolDefinition`]s
//! - [`ToolCall`]: an invocation request with arguments
//! - [`ToolResult`]: execution outcome
//! - [`DomainPattern`] / [`DomainRouter`]: per-agent scoping
//! - [`ToolValidator`]: required-parameter checks

pub mod entities;
pub mod pattern;
pub mod routing;
pub mod traits;
pub mod value_objects;

pub use entities::{TOOL_NAME_SEPARATOR, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use pattern::{DomainPattern, WILDCARD_MARKER};
pub use routing::DomainRouter;
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
