//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod resolve_agent_tools;
pub mod run_team;
