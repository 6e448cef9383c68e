//! User input port
//!
//! How a tool asks the human operator a question.

use async_trait::async_trait;
use thiserror::Error;

/// Why no answer was obtained
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Input cancelled")]
    Cancelled,

    #[error("Timed out waiting for input")]
    TimedOut,

    #[error("Input stream closed")]
    Closed,

    #[error("Input error: {0}")]
    Io(String),
}

/// Port for interactive operator input
#[async_trait]
pub trait UserInputPort: Send + Sync {
    /// Show `question` and wait for one line of input (without the newline).
    async fn ask(&self, question: &str) -> Result<String, InputError>;
}
