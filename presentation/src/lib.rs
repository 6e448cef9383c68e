//! Presentation layer for eventcrew
//!
//! This crate contains CLI definitions and console rendering of the team
//! conversation and the tool catalogue.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, Transport};
pub use output::console::ConsoleFormatter;
pub use output::observer::ConsoleObserver;
