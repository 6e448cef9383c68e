//! Agent domain.
//!
//! - [`AgentProfile`]: name, role, prompt and the domain patterns scoping its tools

pub mod profile;

pub use profile::AgentProfile;
