//! LLM configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Raw `[llm]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Chat-completions model
    pub model: String,
    /// API base URL (anything speaking the OpenAI chat-completions protocol)
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub temperature: Option<f32>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            temperature: None,
            request_timeout_secs: None,
        }
    }
}

impl FileLlmConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_partial_override() {
        let config: super::super::FileConfig = toml::from_str(
            r#"
[llm]
model = "gpt-4o-mini"
temperature = 0.3
"#,
        )
        .unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.temperature, Some(0.3));
        assert_eq!(config.llm.api_key_env, "OPENAI_API_KEY");
        assert!(config.llm.request_timeout().is_none());
    }
}
