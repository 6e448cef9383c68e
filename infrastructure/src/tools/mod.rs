//! Tool handlers and the registry that serves them
//!
//! Each module implements one tool domain as
//! [`ToolHandler`](eventcrew_application::ToolHandler)s:
//! - `event`: event planning and venue suggestions
//! - `fundraising`: fundraising plans and budget calculation
//! - `quality`: deliverable reviews and checklists
//! - `sheets`: Google Sheets reads, listing and structure
//! - `database`, `file`: simulated data access
//! - `user_input`: questions to the human operator

pub mod database;
pub mod event;
pub mod file;
pub mod fundraising;
pub mod quality;
pub mod sheets;
pub mod user_input;

mod registry;
mod schema;

#[cfg(test)]
pub(crate) mod test_support;

pub use registry::ToolRegistry;
pub use schema::JsonSchemaToolConverter;
