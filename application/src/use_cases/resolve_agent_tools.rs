//! Resolve Agent Tools use case.
//!
//! Turns agent profiles into team participants by routing each profile's
//! domain patterns against the registry.

use crate::ports::tool_executor::ToolExecutorPort;
use eventcrew_domain::{AgentProfile, DomainRouter, ToolSpec};
use std::sync::Arc;
use tracing::{info, warn};

/// A team participant: its profile plus the tools it may call.
#[derive(Debug, Clone)]
pub struct Agent {
    pub profile: AgentProfile,
    pub tools: ToolSpec,
}

impl Agent {
    pub fn name(&self) -> &str {
        &self.profile.name
    }
}

pub struct ResolveAgentToolsUseCase {
    tool_executor: Arc<dyn ToolExecutorPort>,
}

impl ResolveAgentToolsUseCase {
    pub fn new(tool_executor: Arc<dyn ToolExecutorPort>) -> Self {
        Self { tool_executor }
    }

    pub fn execute(&self, profiles: Vec<AgentProfile>) -> Vec<Agent> {
        let spec = self.tool_executor.tool_spec();

        profiles
            .into_iter()
            .map(|profile| {
                for pattern in DomainRouter::unmatched(spec, &profile.allowed_domains) {
                    warn!(
                        "Agent '{}': domain pattern '{}' matches no tool",
                        profile.name, pattern
                    );
                }

                let tools = DomainRouter::resolve_spec(spec, &profile.allowed_domains);
                info!("Agent '{}' assigned {} tools", profile.name, tools.len());
                Agent { profile, tools }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eventcrew_domain::{ToolCall, ToolDefinition, ToolResult};

    struct StaticTools {
        spec: ToolSpec,
    }

    #[async_trait]
    impl ToolExecutorPort for StaticTools {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            ToolResult::success(&call.tool_name, "ok")
        }
    }

    fn executor() -> Arc<dyn ToolExecutorPort> {
        Arc::new(StaticTools {
            spec: [
                "ask_user_input",
                "event_plan_event",
                "event_get_venue_suggestions",
                "sheets_read_data",
            ]
            .into_iter()
            .map(|n| ToolDefinition::new(n, n))
            .collect(),
        })
    }

    #[test]
    fn test_default_roster_scoping() {
        let agents = ResolveAgentToolsUseCase::new(executor()).execute(AgentProfile::default_roster());

        let counts: Vec<(&str, usize)> =
            agents.iter().map(|a| (a.name(), a.tools.len())).collect();
        assert_eq!(
            counts,
            vec![
                ("user_assistant", 1),
                ("sheets_explorer", 1),
                ("event_coordinator", 2),
                ("fundraising_coordinator", 0),
                ("quality_checker", 0),
            ]
        );
    }

    #[test]
    fn test_profile_without_domains_gets_no_tools() {
        let agents = ResolveAgentToolsUseCase::new(executor())
            .execute(vec![AgentProfile::new("observer", "Watches")]);
        assert!(agents[0].tools.is_empty());
    }
}
