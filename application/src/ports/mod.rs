//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod composite_observer;
pub mod conversation_observer;
pub mod llm_gateway;
pub mod spreadsheet;
pub mod tool_executor;
pub mod tool_handler;
pub mod tool_schema;
pub mod user_input;
