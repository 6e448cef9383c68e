//! Port for observing a team run as it happens.
//!
//! The console renderer and any other live consumer implement
//! [`ConversationObserver`]. The end-of-run transcript goes through
//! [`TranscriptSink`] instead.

use eventcrew_domain::{ChatEvent, ChatMessage};
use thiserror::Error;

/// Receives every event of a team run, in order.
///
/// `on_event` is synchronous and infallible; observers must not block the run.
pub trait ConversationObserver: Send + Sync {
    fn on_event(&self, event: &ChatEvent);
}

/// No-op implementation for tests and quiet runs.
pub struct NoConversationObserver;

impl ConversationObserver for NoConversationObserver {
    fn on_event(&self, _event: &ChatEvent) {}
}

#[derive(Error, Debug)]
#[error("Failed to write transcript to {path}: {message}")]
pub struct TranscriptError {
    pub path: String,
    pub message: String,
}

/// Persists the full transcript once a run has finished.
pub trait TranscriptSink: Send + Sync {
    fn write_transcript(&self, messages: &[ChatMessage]) -> Result<(), TranscriptError>;
}
