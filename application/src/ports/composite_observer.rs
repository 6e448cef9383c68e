//! Composite conversation observer; delegates to multiple observers.
//!
//! Used to fan out team events to both the console renderer and the JSONL
//! event log.
//!
//! ```text
//! RunTeamUseCase ──▶ CompositeObserver ──┬──▶ ConsoleObserver
//!                                        └──▶ JsonlEventLog
//! ```

use super::conversation_observer::ConversationObserver;
use eventcrew_domain::ChatEvent;
use std::sync::Arc;

/// An observer that hands every event to each delegate, in order.
pub struct CompositeObserver {
    delegates: Vec<Arc<dyn ConversationObserver>>,
}

impl CompositeObserver {
    pub fn new(delegates: Vec<Arc<dyn ConversationObserver>>) -> Self {
        Self { delegates }
    }
}

impl ConversationObserver for CompositeObserver {
    fn on_event(&self, event: &ChatEvent) {
        for d in &self.delegates {
            d.on_event(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventcrew_domain::ChatMessage;
    use std::sync::Mutex;

    struct Recorder {
        name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
    }

    impl ConversationObserver for Recorder {
        fn on_event(&self, event: &ChatEvent) {
            if let ChatEvent::Message(m) = event {
                self.log
                    .lock()
                    .unwrap()
                    .push(format!("{}:{}", self.name, m.content));
            }
        }
    }

    #[test]
    fn test_delegates_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let composite = CompositeObserver::new(vec![
            Arc::new(Recorder { name: "a", log: log.clone() }),
            Arc::new(Recorder { name: "b", log: log.clone() }),
        ]);

        composite.on_event(&ChatEvent::Message(ChatMessage::text("user", "hi")));
        assert_eq!(*log.lock().unwrap(), vec!["a:hi", "b:hi"]);
    }
}
