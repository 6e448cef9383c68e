//! Conversation domain: what a team run produces and when it stops.
//!
//! - [`ChatEvent`]: stream item: a [`ChatMessage`] or the terminal [`TaskResult`]
//! - [`TerminationCondition`]: text mention / message cap, OR-combined
//! - [`transcript`]: the `output.txt` entry format

pub mod message;
pub mod termination;
pub mod transcript;

pub use message::{ChatEvent, ChatMessage, MessageKind, TaskResult};
pub use termination::{DEFAULT_MAX_MESSAGES, DEFAULT_TERMINATION_TOKEN, TerminationCondition};
pub use transcript::{DEFAULT_TRANSCRIPT_FILE, render_entry, render_transcript};
