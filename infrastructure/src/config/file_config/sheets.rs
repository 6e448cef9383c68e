//! Google Sheets configuration from TOML (`[sheets]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sheets::{DEFAULT_CREDENTIALS_FILE, DEFAULT_REDIRECT_PORT, DEFAULT_TOKEN_FILE};

/// How the spreadsheet client authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetsAuthMode {
    /// API key if its variable is set, else OAuth if a token or credentials
    /// file exists, else spreadsheets are disabled
    #[default]
    Auto,
    /// OAuth installed-app flow; missing credentials are a configuration error
    #[serde(rename = "oauth")]
    OAuth,
    /// API key only (public spreadsheets)
    ApiKey,
    /// No spreadsheet access; sheet tools report that they are not configured
    None,
}

/// Raw `[sheets]` configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSheetsConfig {
    pub auth: SheetsAuthMode,
    /// OAuth client secrets downloaded from the Google Cloud console
    pub credentials_file: PathBuf,
    /// Where the user token is cached between runs
    pub token_file: PathBuf,
    /// Loopback port for the consent redirect
    pub redirect_port: u16,
    /// Environment variable holding an API key
    pub api_key_env: String,
}

impl Default for FileSheetsConfig {
    fn default() -> Self {
        Self {
            auth: SheetsAuthMode::Auto,
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            token_file: PathBuf::from(DEFAULT_TOKEN_FILE),
            redirect_port: DEFAULT_REDIRECT_PORT,
            api_key_env: "GOOGLE_CLOUD_API_KEY".to_string(),
        }
    }
}
