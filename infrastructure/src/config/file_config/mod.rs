//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod input;
mod llm;
mod server;
mod sheets;
mod team;

pub use input::{DEFAULT_ANSWER, FileInputConfig};
pub use llm::FileLlmConfig;
pub use server::{FileServerConfig, FileTransport};
pub use sheets::{FileSheetsConfig, SheetsAuthMode};
pub use team::FileTeamConfig;

use eventcrew_domain::AgentProfile;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat model settings
    pub llm: FileLlmConfig,
    /// Google Sheets access
    pub sheets: FileSheetsConfig,
    /// Team run settings
    pub team: FileTeamConfig,
    /// Tool server settings
    pub server: FileServerConfig,
    /// Operator input settings
    pub input: FileInputConfig,
    /// Team roster; empty means the built-in five-agent roster
    pub agents: Vec<AgentProfile>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// A problem found by [`FileConfig::validate`]
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }

    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// The roster to run: `[[agents]]` if any are configured, else the default team.
    pub fn roster(&self) -> Vec<AgentProfile> {
        if self.agents.is_empty() {
            AgentProfile::default_roster()
        } else {
            self.agents.clone()
        }
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Errors make the configuration unusable; warnings are logged and ignored.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.llm.model.trim().is_empty() {
            issues.push(ConfigIssue::error("llm.model", "model name is empty"));
        }
        if let Some(t) = self.llm.temperature
            && !(0.0..=2.0).contains(&t)
        {
            issues.push(ConfigIssue::warning(
                "llm.temperature",
                format!("{} is outside 0.0..=2.0", t),
            ));
        }

        if self.team.max_messages == 0 {
            issues.push(ConfigIssue::error(
                "team.max_messages",
                "must be at least 1",
            ));
        }
        if self.team.termination_token.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "team.termination_token",
                "termination token is empty",
            ));
        }
        if self.team.timeout_secs == Some(0) {
            issues.push(ConfigIssue::warning(
                "team.timeout_secs",
                "0 stops the run immediately; remove it to run without a limit",
            ));
        }
        if let Some(prompt) = &self.team.selector_prompt
            && !prompt.contains("{participants}")
        {
            issues.push(ConfigIssue::warning(
                "team.selector_prompt",
                "does not mention {participants}; the selector cannot see who may speak",
            ));
        }

        if self.server.port == 0 {
            issues.push(ConfigIssue::warning(
                "server.port",
                "port 0 binds a random port",
            ));
        }

        let mut seen = HashSet::new();
        for (i, agent) in self.agents.iter().enumerate() {
            let field = format!("agents[{}]", i);
            if agent.name.trim().is_empty() {
                issues.push(ConfigIssue::error(format!("{}.name", field), "agent name is empty"));
            } else if !seen.insert(agent.name.as_str()) {
                issues.push(ConfigIssue::error(
                    format!("{}.name", field),
                    format!("duplicate agent name '{}'", agent.name),
                ));
            }
            if agent.description.trim().is_empty() {
                issues.push(ConfigIssue::warning(
                    format!("{}.description", field),
                    "no description; the speaker selector will only see the name",
                ));
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[llm]
model = "gpt-4o-mini"
base_url = "http://localhost:11434/v1"

[team]
prompts_file = "config/prompts.json"
max_messages = 10

[input]
timeout_secs = 30

[[agents]]
name = "planner"
description = "Plans events"
allowed_domains = ["event_*", "ask_user_input"]

[[agents]]
name = "treasurer"
description = "Owns the budget"
allowed_domains = ["fundraising_"]
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.llm.base_url, "http://localhost:11434/v1");
        assert_eq!(config.team.max_messages, 10);
        assert_eq!(config.input.timeout_secs, Some(30));
        assert_eq!(config.input.default_answer, "Default response");

        let roster = config.roster();
        assert_eq!(roster.len(), 2);
        assert!(roster[0].allowed_domains[0].matches("event_plan_event"));
        assert!(roster[1].allowed_domains[0].matches("fundraising_create_plan"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_empty_roster_uses_default_team() {
        let config = FileConfig::default();
        assert_eq!(config.roster().len(), 5);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_issues() {
        let toml_str = r#"
[llm]
model = ""

[team]
max_messages = 0
selector_prompt = "pick someone"

[[agents]]
name = "planner"
description = "Plans"

[[agents]]
name = "planner"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();

        assert!(fields.contains(&"llm.model"));
        assert!(fields.contains(&"team.max_messages"));
        assert!(fields.contains(&"team.selector_prompt"));
        assert!(fields.contains(&"agents[1].name"));
        assert!(fields.contains(&"agents[1].description"));

        let errors = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        assert_eq!(errors, 3);
    }
}
