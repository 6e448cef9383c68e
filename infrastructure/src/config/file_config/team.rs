//! Team run configuration from TOML (`[team]` section)

use eventcrew_application::TeamParams;
use eventcrew_domain::conversation::DEFAULT_TRANSCRIPT_FILE;
use eventcrew_domain::{DEFAULT_MAX_MESSAGES, DEFAULT_TERMINATION_TOKEN, TerminationCondition};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Raw `[team]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTeamConfig {
    /// JSON file with one system prompt per agent plus `MainTask`
    pub prompts_file: PathBuf,
    /// Task text; overrides `MainTask` from the prompts file
    pub task: Option<String>,
    pub max_messages: usize,
    pub termination_token: String,
    /// Wall-clock limit for the whole run, in seconds
    pub timeout_secs: Option<u64>,
    pub transcript_file: PathBuf,
    pub allow_repeated_speaker: bool,
    pub reflect_on_tool_use: bool,
    /// Custom speaker-selection prompt with `{roles}`, `{history}`, `{participants}`
    pub selector_prompt: Option<String>,
}

impl Default for FileTeamConfig {
    fn default() -> Self {
        Self {
            prompts_file: PathBuf::from("prompts.json"),
            task: None,
            max_messages: DEFAULT_MAX_MESSAGES,
            termination_token: DEFAULT_TERMINATION_TOKEN.to_string(),
            timeout_secs: None,
            transcript_file: PathBuf::from(DEFAULT_TRANSCRIPT_FILE),
            allow_repeated_speaker: true,
            reflect_on_tool_use: true,
            selector_prompt: None,
        }
    }
}

impl FileTeamConfig {
    pub fn termination(&self) -> TerminationCondition {
        TerminationCondition::text_mention(&self.termination_token)
            .or(TerminationCondition::max_messages(self.max_messages))
    }

    pub fn to_params(&self) -> TeamParams {
        let mut params = TeamParams::default()
            .with_termination(self.termination())
            .with_allow_repeated_speaker(self.allow_repeated_speaker)
            .with_reflect_on_tool_use(self.reflect_on_tool_use)
            .with_timeout(self.timeout_secs.map(Duration::from_secs));
        if let Some(prompt) = &self.selector_prompt {
            params = params.with_selector_prompt(prompt.clone());
        }
        params
    }
}
