//! Run records written to disk.
//!
//! - [`TranscriptFileWriter`]: the plain-text transcript (`output.txt`),
//!   implementing [`TranscriptSink`](eventcrew_application::TranscriptSink)
//! - [`JsonlEventLog`]: one JSON line per chat event, implementing
//!   [`ConversationObserver`](eventcrew_application::ConversationObserver)

mod jsonl_logger;
mod transcript;

pub use jsonl_logger::JsonlEventLog;
pub use transcript::TranscriptFileWriter;
