//! Configuration management
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//! 1. CLI arguments
//! 2. `EVENTCREW_*` environment variables
//! 3. `--config <path>`
//! 4. Project config (`./eventcrew.toml`)
//! 5. Global config (`~/.config/eventcrew/config.toml`)
//! 6. Default values
//!
//! The agent prompts live in their own JSON file, see [`PromptBook`].

mod error;
mod file_config;
mod loader;
mod prompts;

pub use error::ConfigError;
pub use file_config::{
    ConfigIssue, DEFAULT_ANSWER, FileConfig, FileInputConfig, FileLlmConfig, FileServerConfig,
    FileSheetsConfig, FileTeamConfig, FileTransport, Severity, SheetsAuthMode,
};
pub use loader::ConfigLoader;
pub use prompts::{MAIN_TASK_KEY, PromptBook};
