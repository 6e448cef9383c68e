//! Team parameters; run loop control.
//!
//! [`TeamParams`] groups the static parameters that control
//! [`RunTeamUseCase`](crate::use_cases::run_team::RunTeamUseCase).

use eventcrew_domain::TerminationCondition;
use std::time::Duration;

/// Prompt used to pick the next speaker.
///
/// `{roles}`, `{history}` and `{participants}` are substituted before sending.
pub const DEFAULT_SELECTOR_PROMPT: &str = "\
{roles}

Current conversation context:
{history}

Read the above conversation, then select an agent from {participants} to perform the next task.
Make sure the planner agent has assigned tasks before other agents start working. If the task has been fulfilled, tell the next agent to say 'TERMINATE' to end the conversation.
Only select one agent.";

/// Run loop control parameters.
#[derive(Debug, Clone)]
pub struct TeamParams {
    pub termination: TerminationCondition,
    pub selector_prompt: String,
    /// Whether the same agent may speak twice in a row.
    pub allow_repeated_speaker: bool,
    /// Ask the agent for a closing text reply after its tools ran.
    pub reflect_on_tool_use: bool,
    /// Wall-clock limit for the whole run.
    pub timeout: Option<Duration>,
}

impl Default for TeamParams {
    fn default() -> Self {
        Self {
            termination: TerminationCondition::default(),
            selector_prompt: DEFAULT_SELECTOR_PROMPT.to_string(),
            allow_repeated_speaker: true,
            reflect_on_tool_use: true,
            timeout: None,
        }
    }
}

impl TeamParams {
    pub fn with_termination(mut self, termination: TerminationCondition) -> Self {
        self.termination = termination;
        self
    }

    pub fn with_selector_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.selector_prompt = prompt.into();
        self
    }

    pub fn with_allow_repeated_speaker(mut self, allow: bool) -> Self {
        self.allow_repeated_speaker = allow;
        self
    }

    pub fn with_reflect_on_tool_use(mut self, reflect: bool) -> Self {
        self.reflect_on_tool_use = reflect;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
