//! Conditions that end a team run.

use super::message::ChatMessage;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TERMINATION_TOKEN: &str = "TERMINATE";
pub const DEFAULT_MAX_MESSAGES: usize = 25;

/// When a team run should stop.
///
/// The team evaluates the condition after every message it appends, so a
/// text mention only needs to inspect the newest message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminationCondition {
    /// The newest message contains this token
    TextMention(String),
    /// The transcript holds at least this many messages
    MaxMessages(usize),
    /// Any of the inner conditions
    Any(Vec<TerminationCondition>),
}

impl TerminationCondition {
    pub fn text_mention(token: impl Into<String>) -> Self {
        TerminationCondition::TextMention(token.into())
    }

    pub fn max_messages(n: usize) -> Self {
        TerminationCondition::MaxMessages(n)
    }

    /// Combine two conditions; either one stops the run.
    pub fn or(self, other: TerminationCondition) -> Self {
        match self {
            TerminationCondition::Any(mut inner) => {
                inner.push(other);
                TerminationCondition::Any(inner)
            }
            first => TerminationCondition::Any(vec![first, other]),
        }
    }

    /// Stop reason if the transcript satisfies the condition.
    pub fn check(&self, transcript: &[ChatMessage]) -> Option<String> {
        match self {
            TerminationCondition::TextMention(token) => transcript
                .last()
                .filter(|m| m.content.contains(token.as_str()))
                .map(|_| format!("Text '{}' mentioned", token)),
            TerminationCondition::MaxMessages(max) => (transcript.len() >= *max).then(|| {
                format!(
                    "Maximum number of messages {} reached, current message count: {}",
                    max,
                    transcript.len()
                )
            }),
            TerminationCondition::Any(conditions) => {
                conditions.iter().find_map(|c| c.check(transcript))
            }
        }
    }
}

impl Default for TerminationCondition {
    fn default() -> Self {
        TerminationCondition::text_mention(DEFAULT_TERMINATION_TOKEN)
            .or(TerminationCondition::max_messages(DEFAULT_MAX_MESSAGES))
    }
}
