//! Live console rendering of a team run

use super::console::ConsoleFormatter;
use eventcrew_application::ConversationObserver;
use eventcrew_domain::ChatEvent;
use std::io::Write;

/// Prints every message as it arrives, then the stop line.
pub struct ConsoleObserver {
    quiet_tools: bool,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self { quiet_tools: false }
    }

    /// Hide raw tool request/execution events; summaries and text still show.
    pub fn with_quiet_tools(mut self, quiet: bool) -> Self {
        self.quiet_tools = quiet;
        self
    }

    fn render(&self, event: &ChatEvent) -> Option<String> {
        match event {
            ChatEvent::Message(message) => {
                if self.quiet_tools && !message.kind.is_conversational() {
                    return None;
                }
                Some(ConsoleFormatter::format_message(message))
            }
            ChatEvent::Finished(result) => Some(ConsoleFormatter::format_result(result)),
        }
    }
}

impl Default for ConsoleObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationObserver for ConsoleObserver {
    fn on_event(&self, event: &ChatEvent) {
        if let Some(text) = self.render(event) {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "{}", text);
            let _ = stdout.flush();
        }
    }
}
