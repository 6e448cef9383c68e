//! Operator input configuration from TOML (`[input]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_ANSWER: &str = "Default response";

/// Raw `[input]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInputConfig {
    /// Seconds to wait for an answer; unset waits indefinitely
    pub timeout_secs: Option<u64>,
    /// Answer used on timeout or when the operator just presses enter
    pub default_answer: String,
}

impl Default for FileInputConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            default_answer: DEFAULT_ANSWER.to_string(),
        }
    }
}

impl FileInputConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
