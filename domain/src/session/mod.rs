//! LLM session domain.
//!
//! - [`entities::Message`]: a role-tagged message sent to the model
//! - [`response::LlmResponse`]: text and tool-use blocks coming back

pub mod entities;
pub mod response;
