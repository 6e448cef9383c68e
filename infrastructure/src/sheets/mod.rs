//! Google Sheets adapter
//!
//! [`GoogleSheetsClient`] implements
//! [`SpreadsheetGateway`] over the Sheets v4 and
//! Drive v3 REST APIs. [`build_gateway`] picks the authentication mode from
//! the `[sheets]` configuration.

mod client;
pub mod oauth;
mod wire;

pub use client::{DRIVE_BASE_URL, GoogleSheetsClient, SHEETS_BASE_URL, SheetsAuth, UnconfiguredSheets};
pub use oauth::{
    AuthError, DEFAULT_CREDENTIALS_FILE, DEFAULT_REDIRECT_PORT, DEFAULT_TOKEN_FILE,
    OAuthAuthenticator,
};

use crate::config::{ConfigError, FileSheetsConfig, SheetsAuthMode};
use eventcrew_application::SpreadsheetGateway;
use std::sync::Arc;
use tracing::{info, warn};

/// Build the spreadsheet gateway for `config`, reading the API key from the environment.
pub fn build_gateway(config: &FileSheetsConfig) -> Result<Arc<dyn SpreadsheetGateway>, ConfigError> {
    let api_key = std::env::var(&config.api_key_env)
        .ok()
        .filter(|key| !key.trim().is_empty());
    gateway_for(config, api_key)
}

fn gateway_for(
    config: &FileSheetsConfig,
    api_key: Option<String>,
) -> Result<Arc<dyn SpreadsheetGateway>, ConfigError> {
    let has_oauth_files = config.credentials_file.exists() || config.token_file.exists();

    match config.auth {
        SheetsAuthMode::None => {
            info!("Google Sheets access disabled by configuration");
            Ok(Arc::new(UnconfiguredSheets::new(
                "Google Sheets access is disabled ([sheets] auth = \"none\")",
            )))
        }
        SheetsAuthMode::ApiKey => match api_key {
            Some(key) => api_key_client(key),
            None => Err(ConfigError::MissingEnv {
                var: config.api_key_env.clone(),
                hint: "Create an API key in the Google Cloud console and export it",
            }),
        },
        SheetsAuthMode::OAuth if !has_oauth_files => Err(missing_credentials(config)),
        SheetsAuthMode::OAuth => oauth_client(config),
        SheetsAuthMode::Auto => {
            if let Some(key) = api_key {
                api_key_client(key)
            } else if has_oauth_files {
                oauth_client(config)
            } else {
                warn!(
                    "No Google credentials ({} / {} / ${}); sheet tools will report errors",
                    config.credentials_file.display(),
                    config.token_file.display(),
                    config.api_key_env
                );
                Ok(Arc::new(UnconfiguredSheets::new(
                    missing_credentials(config).to_string(),
                )))
            }
        }
    }
}

fn missing_credentials(config: &FileSheetsConfig) -> ConfigError {
    ConfigError::MissingCredentials {
        credentials: config.credentials_file.clone(),
        token: config.token_file.clone(),
        api_key_env: config.api_key_env.clone(),
    }
}

fn api_key_client(key: String) -> Result<Arc<dyn SpreadsheetGateway>, ConfigError> {
    info!("Google Sheets: API key (public spreadsheets only)");
    let client = GoogleSheetsClient::new(SheetsAuth::ApiKey(key))
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(Arc::new(client))
}

fn oauth_client(config: &FileSheetsConfig) -> Result<Arc<dyn SpreadsheetGateway>, ConfigError> {
    info!(
        "Google Sheets: OAuth ({})",
        config.credentials_file.display()
    );
    let auth = OAuthAuthenticator::new(&config.credentials_file, &config.token_file)
        .with_redirect_port(config.redirect_port);
    let client = GoogleSheetsClient::new(SheetsAuth::OAuth(Arc::new(auth)))
        .map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(Arc::new(client))
}
