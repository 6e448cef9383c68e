//! Plain-text transcript format written at the end of a run.

use super::message::ChatMessage;
use std::fmt::Write;

/// Default transcript file name.
pub const DEFAULT_TRANSCRIPT_FILE: &str = "output.txt";

/// One transcript entry:
///
/// ```text
/// ---------- <kind> (<source>) ----------
/// <content>
///
/// ```
pub fn render_entry(message: &ChatMessage) -> String {
    format!(
        "---------- {} ({}) ----------\n{}\n\n",
        message.kind, message.source, message.content
    )
}

pub fn render_transcript(messages: &[ChatMessage]) -> String {
    messages.iter().fold(String::new(), |mut out, m| {
        let _ = write!(out, "{}", render_entry(m));
        out
    })
}
