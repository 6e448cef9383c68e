//! Agent profiles: who takes part in a team run and which tools each may use.

use crate::tool::pattern::DomainPattern;
use serde::{Deserialize, Serialize};

/// A team participant before tools are resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Stable agent name, also the key of its prompt
    pub name: String,
    /// One-line role summary shown to the speaker selector
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub system_prompt: String,
    /// Tool scope; empty means no tools
    #[serde(default)]
    pub allowed_domains: Vec<DomainPattern>,
}

impl AgentProfile {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            system_prompt: String::new(),
            allowed_domains: Vec::new(),
        }
    }

    pub fn with_domains<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_domains = DomainPattern::parse_all(patterns);
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// The five-agent event team.
    pub fn default_roster() -> Vec<AgentProfile> {
        vec![
            AgentProfile::new(
                "user_assistant",
                "Talks to the human operator and relays their answers",
            )
            .with_domains(["ask_user_input"]),
            AgentProfile::new(
                "sheets_explorer",
                "Finds and reads the Google Sheets that hold event data",
            )
            .with_domains(["sheets_"]),
            AgentProfile::new(
                "event_coordinator",
                "Plans the event and suggests venues",
            )
            .with_domains(["event_"]),
            AgentProfile::new(
                "fundraising_coordinator",
                "Builds fundraising plans and budgets",
            )
            .with_domains(["fundraising_"]),
            AgentProfile::new(
                "quality_checker",
                "Reviews deliverables against quality checklists",
            )
            .with_domains(["quality_"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_domains() {
        let roster = AgentProfile::default_roster();
        let names: Vec<&str> = roster.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "user_assistant",
                "sheets_explorer",
                "event_coordinator",
                "fundraising_coordinator",
                "quality_checker"
            ]
        );
        assert_eq!(
            roster[0].allowed_domains,
            vec![DomainPattern::Exact("ask_user_input".into())]
        );
        assert_eq!(
            roster[2].allowed_domains,
            vec![DomainPattern::Prefix("event_".into())]
        );
    }

    #[test]
    fn test_profile_deserializes_patterns() {
        let profile: AgentProfile = serde_json::from_str(
            r#"{"name": "ops", "allowed_domains": ["db_query", "file_*"]}"#,
        )
        .unwrap();
        assert_eq!(profile.allowed_domains.len(), 2);
        assert!(profile.system_prompt.is_empty());
        assert!(profile.allowed_domains[1].matches("file_read"));
    }
}
