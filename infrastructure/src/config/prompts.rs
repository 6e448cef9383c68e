//! Agent system prompts and the team task, loaded from a JSON object.
//!
//! ```json
//! {
//!   "UserAssistant": "You relay questions to the operator...",
//!   "EventCoordinator": "You plan the event...",
//!   "MainTask": "Plan a charity gala for 120 guests..."
//! }
//! ```
//!
//! Keys are agent names, either as written (`event_coordinator`) or in
//! CamelCase (`EventCoordinator`).

use super::ConfigError;
use eventcrew_domain::AgentProfile;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key of the task text.
pub const MAIN_TASK_KEY: &str = "MainTask";

#[derive(Debug, Clone)]
pub struct PromptBook {
    path: PathBuf,
    prompts: BTreeMap<String, String>,
}

impl PromptBook {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::MissingPrompts {
                path: path.to_path_buf(),
            },
            _ => ConfigError::InvalidPrompts {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        Self::parse(path, &content)
    }

    fn parse(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let prompts: BTreeMap<String, String> =
            serde_json::from_str(content).map_err(|e| ConfigError::InvalidPrompts {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!("Loaded {} prompts from {}", prompts.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            prompts,
        })
    }

    /// Prompt for `agent_name`, trying the name itself then its CamelCase form.
    pub fn get(&self, agent_name: &str) -> Option<&str> {
        self.prompts
            .get(agent_name)
            .or_else(|| self.prompts.get(&camel_case(agent_name)))
            .map(String::as_str)
    }

    /// The task: `task_override` if given, else `MainTask`.
    pub fn task(&self, task_override: Option<&str>) -> Result<String, ConfigError> {
        match task_override.or_else(|| self.prompts.get(MAIN_TASK_KEY).map(String::as_str)) {
            Some(task) if !task.trim().is_empty() => Ok(task.to_string()),
            _ => Err(ConfigError::MissingTask {
                path: self.path.clone(),
                key: MAIN_TASK_KEY,
            }),
        }
    }

    /// Fill in the system prompt of every profile that does not carry its own.
    ///
    /// Profiles without any prompt fall back to their description.
    pub fn apply(&self, profiles: Vec<AgentProfile>) -> Vec<AgentProfile> {
        profiles
            .into_iter()
            .map(|profile| {
                if !profile.system_prompt.is_empty() {
                    return profile;
                }
                match self.get(&profile.name) {
                    Some(prompt) => {
                        let prompt = prompt.to_string();
                        profile.with_system_prompt(prompt)
                    }
                    None => {
                        warn!(
                            "No prompt for agent '{}' in {}; using its description",
                            profile.name,
                            self.path.display()
                        );
                        let prompt = format!(
                            "You are {}. {}",
                            profile.name, profile.description
                        );
                        profile.with_system_prompt(prompt.trim_end())
                    }
                }
            })
            .collect()
    }
}

/// `event_coordinator` -> `EventCoordinator`
fn camel_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
