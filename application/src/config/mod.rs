//! Application-level configuration.
//!
//! - [`TeamParams`]: team run control (termination, speaker selection, timeout)

pub mod team_params;

pub use team_params::{DEFAULT_SELECTOR_PROMPT, TeamParams};
