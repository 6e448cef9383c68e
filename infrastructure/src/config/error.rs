use std::path::PathBuf;
use thiserror::Error;

/// Problems that stop a command before it starts.
///
/// Every variant carries the fix in its message.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "Prompts file not found: {}\n  Create it with one entry per agent plus \"MainTask\", or point [team].prompts_file / --prompts at it",
        path.display()
    )]
    MissingPrompts { path: PathBuf },

    #[error("Invalid prompts file {}: {message}", path.display())]
    InvalidPrompts { path: PathBuf, message: String },

    #[error(
        "No task given\n  Pass --task, set [team].task, or add \"{key}\" to {}",
        path.display()
    )]
    MissingTask { path: PathBuf, key: &'static str },

    #[error(
        "Google OAuth credentials not found: {} (token file {} not found either)\n  Download an OAuth client (Desktop app) from the Google Cloud console and save it as {}, or set {api_key_env} for public spreadsheets",
        credentials.display(), token.display(), credentials.display()
    )]
    MissingCredentials {
        credentials: PathBuf,
        token: PathBuf,
        api_key_env: String,
    },

    #[error("Environment variable {var} is not set\n  {hint}")]
    MissingEnv { var: String, hint: &'static str },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_remediation() {
        let err = ConfigError::MissingPrompts {
            path: PathBuf::from("prompts.json"),
        };
        let text = err.to_string();
        assert!(text.contains("prompts.json"));
        assert!(text.contains("--prompts"));

        let err = ConfigError::MissingCredentials {
            credentials: PathBuf::from("credentials.json"),
            token: PathBuf::from("token.json"),
            api_key_env: "GOOGLE_CLOUD_API_KEY".into(),
        };
        let text = err.to_string();
        assert!(text.contains("Desktop app"));
        assert!(text.contains("GOOGLE_CLOUD_API_KEY"));
    }
}
