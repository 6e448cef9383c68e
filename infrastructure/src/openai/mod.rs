//! OpenAI-compatible chat-completions adapter for [`LlmGateway`](eventcrew_application::LlmGateway).

mod gateway;

pub use gateway::{DEFAULT_BASE_URL, DEFAULT_MODEL, OpenAiChatGateway};

use crate::config::{ConfigError, FileLlmConfig};

/// Build the gateway for `[llm]`, reading the API key from `api_key_env`.
pub fn build_gateway(config: &FileLlmConfig) -> Result<OpenAiChatGateway, ConfigError> {
    let api_key = std::env::var(&config.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnv {
            var: config.api_key_env.clone(),
            hint: "Export your OpenAI API key (or set [llm].api_key_env)",
        })?;
    gateway_with_key(config, api_key)
}

fn gateway_with_key(
    config: &FileLlmConfig,
    api_key: String,
) -> Result<OpenAiChatGateway, ConfigError> {
    let gateway = OpenAiChatGateway::new(api_key)
        .with_model(&config.model)
        .with_base_url(&config.base_url)
        .with_temperature(config.temperature);

    match config.request_timeout() {
        Some(timeout) => gateway
            .with_timeout(timeout)
            .map_err(|e| ConfigError::Invalid(e.to_string())),
        None => Ok(gateway),
    }
}
