//! OAuth 2.0 installed-application flow for Google APIs.
//!
//! Token acquisition order:
//! 1. the cached token, if still valid
//! 2. the token file, if present and still valid
//! 3. a refresh with the stored refresh token
//! 4. interactive consent through a loopback redirect
//!
//! Concurrent callers share one in-flight acquisition: the cached token sits
//! behind a `tokio::sync::Mutex` that is held for the whole sequence.

use axum::{
    Router,
    extract::{Query, State},
};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use reqwest::{Client as HttpClient, Url};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, info, warn};

/// Read-only access to spreadsheets and the drive listing.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";
pub const DEFAULT_TOKEN_FILE: &str = "token.json";
pub const DEFAULT_REDIRECT_PORT: u16 = 8080;

const DEFAULT_AUTH_URI: &str = "https://accounts.google.com/o/oauth2/auth";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Tokens this close to expiry are refreshed ahead of use.
const EXPIRY_SKEW_SECS: i64 = 225;

const TEST_USER_HINT: &str = "If the OAuth consent screen is in testing mode, add yourself as a test user in the Google Cloud console.";

const CALLBACK_PAGE: &str = "The authentication flow has completed. You may close this window.";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error(
        "Google Sheets credentials file '{}' not found. Create an OAuth client ID (Desktop app) in the Google Cloud console and save its JSON there.",
        .0.display()
    )]
    MissingCredentials(PathBuf),

    #[error("Invalid credentials file '{}': {message}", .path.display())]
    InvalidCredentials { path: PathBuf, message: String },

    #[error("Token refresh failed: {0}")]
    Refresh(String),

    #[error("Authorization was not granted ({0}). {hint}", hint = TEST_USER_HINT)]
    ConsentDenied(String),

    #[error("Token exchange failed: {0}. {hint}", hint = TEST_USER_HINT)]
    Exchange(String),

    #[error("Could not listen for the OAuth redirect on port {port}: {message}")]
    Listener { port: u16, message: String },

    #[error("Failed to save token to '{}': {message}", .path.display())]
    TokenStore { path: PathBuf, message: String },
}

/// Client id/secret from the `installed` (or `web`) section of a downloaded credentials file.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_auth_uri() -> String {
    DEFAULT_AUTH_URI.to_string()
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Deserialize)]
struct ClientSecretsFile {
    installed: Option<ClientConfig>,
    web: Option<ClientConfig>,
}

impl ClientConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, AuthError> {
        let file: ClientSecretsFile =
            serde_json::from_str(text).map_err(|e| AuthError::InvalidCredentials {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        file.installed
            .or(file.web)
            .ok_or_else(|| AuthError::InvalidCredentials {
                path: path.to_path_buf(),
                message: "expected an \"installed\" or \"web\" client section".to_string(),
            })
    }
}

/// Persisted user token. Field names match the authorized-user JSON format,
/// so token files written by other Google client libraries load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Access token
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
    pub client_id: String,
    pub client_secret: String,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,
}

impl StoredToken {
    /// A token without a recorded expiry is treated as valid.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expiry
            .is_some_and(|expiry| now + ChronoDuration::seconds(EXPIRY_SKEW_SECS) >= expiry)
    }

    pub fn can_refresh(&self) -> bool {
        self.refresh_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    fn apply(&mut self, response: TokenResponse, now: DateTime<Utc>) {
        self.token = response.access_token;
        self.expiry = response
            .expires_in
            .map(|secs| now + ChronoDuration::seconds(secs));
        if let Some(refresh) = response.refresh_token {
            self.refresh_token = Some(refresh);
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// Query parameters delivered to the loopback redirect.
#[derive(Debug, Default, Deserialize)]
struct RedirectQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
enum Callback {
    Code { code: String, state: Option<String> },
    Denied(String),
}

impl RedirectQuery {
    /// `None` for requests that carry neither a code nor an error, such as a
    /// browser fetching `/favicon.ico`.
    fn into_callback(self) -> Option<Callback> {
        match (self.code, self.error) {
            (_, Some(error)) => Some(Callback::Denied(error)),
            (Some(code), None) => Some(Callback::Code {
                code,
                state: self.state,
            }),
            (None, None) => None,
        }
    }
}

async fn receive_redirect(
    State(callbacks): State<mpsc::Sender<Callback>>,
    Query(query): Query<RedirectQuery>,
) -> &'static str {
    if let Some(callback) = query.into_callback() {
        // Only the first callback counts; later ones find the channel full.
        let _ = callbacks.try_send(callback);
    }
    CALLBACK_PAGE
}

/// Serve the redirect on `listener` until a request carries a code or an
/// error, then shut the server down and check `expected_state`.
async fn await_callback(listener: TcpListener, expected_state: &str) -> Result<String, AuthError> {
    let port = listener.local_addr().map(|a| a.port()).unwrap_or_default();
    let (callbacks, mut received) = mpsc::channel(1);
    let (stop, stopped) = oneshot::channel::<()>();

    let router = Router::new()
        .fallback(receive_redirect)
        .with_state(callbacks);
    let server = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let _ = stopped.await;
            })
            .await
    });

    let callback = received.recv().await;
    let _ = stop.send(());
    match server.await {
        Ok(Err(e)) => debug!("Redirect server error: {}", e),
        Err(e) => debug!("Redirect server task failed: {}", e),
        Ok(Ok(())) => {}
    }

    match callback {
        Some(Callback::Code { code, state }) => {
            if state.as_deref() != Some(expected_state) {
                return Err(AuthError::ConsentDenied("state mismatch".to_string()));
            }
            Ok(code)
        }
        Some(Callback::Denied(reason)) => Err(AuthError::ConsentDenied(reason)),
        None => Err(AuthError::Listener {
            port,
            message: "redirect server stopped before a callback arrived".to_string(),
        }),
    }
}

/// Obtains and caches Google access tokens for one credentials/token file pair.
pub struct OAuthAuthenticator {
    http_client: HttpClient,
    credentials_path: PathBuf,
    token_path: PathBuf,
    redirect_port: u16,
    cached: Mutex<Option<StoredToken>>,
}

impl OAuthAuthenticator {
    pub fn new(credentials_path: impl Into<PathBuf>, token_path: impl Into<PathBuf>) -> Self {
        Self {
            http_client: HttpClient::new(),
            credentials_path: credentials_path.into(),
            token_path: token_path.into(),
            redirect_port: DEFAULT_REDIRECT_PORT,
            cached: Mutex::new(None),
        }
    }

    pub fn with_redirect_port(mut self, port: u16) -> Self {
        self.redirect_port = port;
        self
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    pub fn token_path(&self) -> &Path {
        &self.token_path
    }

    /// A usable access token, acquiring one if needed.
    pub async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref()
            && !token.is_expired(now)
        {
            return Ok(token.token.clone());
        }

        let mut candidate = match cached.take() {
            Some(token) => Some(token),
            None => self.load_token_file().await,
        };

        if let Some(token) = candidate.take_if(|t| !t.is_expired(now)) {
            let access = token.token.clone();
            *cached = Some(token);
            return Ok(access);
        }

        if let Some(mut token) = candidate.take()
            && token.can_refresh()
        {
            match self.refresh(&mut token).await {
                Ok(()) => {
                    self.save_token(&token).await;
                    let access = token.token.clone();
                    *cached = Some(token);
                    return Ok(access);
                }
                Err(e) => warn!("{}; falling back to interactive consent", e),
            }
        }

        let token = self.interactive_consent().await?;
        self.save_token(&token).await;
        let access = token.token.clone();
        *cached = Some(token);
        Ok(access)
    }

    /// Drop the cached token so the next call re-acquires one.
    pub async fn invalidate(&self) {
        self.cached.lock().await.take();
    }

    async fn load_token_file(&self) -> Option<StoredToken> {
        let text = tokio::fs::read_to_string(&self.token_path).await.ok()?;
        match serde_json::from_str::<StoredToken>(&text) {
            Ok(token) => {
                debug!("Loaded token from {}", self.token_path.display());
                Some(token)
            }
            Err(e) => {
                warn!(
                    "Error loading credentials from {}: {}",
                    self.token_path.display(),
                    e
                );
                None
            }
        }
    }

    async fn save_token(&self, token: &StoredToken) {
        if let Err(e) = self.write_token(token).await {
            warn!("{}", e);
        }
    }

    async fn write_token(&self, token: &StoredToken) -> Result<(), AuthError> {
        let store_err = |message: String| AuthError::TokenStore {
            path: self.token_path.clone(),
            message,
        };
        let json = serde_json::to_string_pretty(token).map_err(|e| store_err(e.to_string()))?;
        if let Some(parent) = self.token_path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| store_err(e.to_string()))?;
        }
        tokio::fs::write(&self.token_path, json)
            .await
            .map_err(|e| store_err(e.to_string()))
    }

    async fn refresh(&self, token: &mut StoredToken) -> Result<(), AuthError> {
        let refresh_token = token.refresh_token.clone().unwrap_or_default();
        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", token.client_id.as_str()),
            ("client_secret", token.client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
        ];
        let response = self
            .post_token(&token.token_uri, &params)
            .await
            .map_err(AuthError::Refresh)?;
        token.apply(response, Utc::now());
        info!("Refreshed Google access token");
        Ok(())
    }

    async fn post_token(
        &self,
        token_uri: &str,
        params: &[(&str, &str)],
    ) -> Result<TokenResponse, String> {
        let response = self
            .http_client
            .post(token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {}: {}", status, body));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| e.to_string())
    }

    async fn read_client_config(&self) -> Result<ClientConfig, AuthError> {
        let text = match tokio::fs::read_to_string(&self.credentials_path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AuthError::MissingCredentials(self.credentials_path.clone()));
            }
            Err(e) => {
                return Err(AuthError::InvalidCredentials {
                    path: self.credentials_path.clone(),
                    message: e.to_string(),
                });
            }
        };
        ClientConfig::from_json(&self.credentials_path, &text)
    }

    fn authorization_url(
        &self,
        client: &ClientConfig,
        redirect_uri: &str,
        state: &str,
    ) -> Result<Url, AuthError> {
        let scope = SCOPES.join(" ");
        Url::parse_with_params(
            &client.auth_uri,
            &[
                ("client_id", client.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("scope", scope.as_str()),
                ("access_type", "offline"),
                ("prompt", "consent"),
                ("state", state),
            ],
        )
        .map_err(|e| AuthError::InvalidCredentials {
            path: self.credentials_path.clone(),
            message: format!("bad auth_uri: {}", e),
        })
    }

    async fn interactive_consent(&self) -> Result<StoredToken, AuthError> {
        let client = self.read_client_config().await?;

        let listener = TcpListener::bind(("127.0.0.1", self.redirect_port))
            .await
            .map_err(|e| AuthError::Listener {
                port: self.redirect_port,
                message: e.to_string(),
            })?;
        let redirect_uri = format!("http://localhost:{}/", self.redirect_port);
        let state = format!(
            "{:x}{:x}",
            Utc::now().timestamp_nanos_opt().unwrap_or_default(),
            std::process::id()
        );
        let url = self.authorization_url(&client, &redirect_uri, &state)?;

        info!("Waiting for Google authorization on {}", redirect_uri);
        eprintln!(
            "Please visit this URL to authorize Google Sheets access:\n\n  {}\n",
            url
        );
        if webbrowser::open(url.as_str()).is_ok() {
            eprintln!("(Opened in your browser)");
        } else {
            debug!("Could not open a browser; waiting for the URL above to be visited");
        }

        let code = await_callback(listener, &state).await?;

        let params = [
            ("grant_type", "authorization_code"),
            ("code", code.as_str()),
            ("client_id", client.client_id.as_str()),
            ("client_secret", client.client_secret.as_str()),
            ("redirect_uri", redirect_uri.as_str()),
        ];
        let response = self
            .post_token(&client.token_uri, &params)
            .await
            .map_err(AuthError::Exchange)?;

        let mut token = StoredToken {
            token: String::new(),
            refresh_token: None,
            token_uri: client.token_uri,
            client_id: client.client_id,
            client_secret: client.client_secret,
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            expiry: None,
        };
        token.apply(response, Utc::now());
        info!("Google authorization complete");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn token(expiry: Option<DateTime<Utc>>) -> StoredToken {
        StoredToken {
            token: "ya29.access".into(),
            refresh_token: Some("1//refresh".into()),
            token_uri: DEFAULT_TOKEN_URI.into(),
            client_id: "id.apps.googleusercontent.com".into(),
            client_secret: "secret".into(),
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            expiry,
        }
    }

    #[test]
    fn test_expiry_with_skew() {
        let now = Utc::now();
        assert!(!token(None).is_expired(now));
        assert!(!token(Some(now + ChronoDuration::hours(1))).is_expired(now));
        assert!(token(Some(now + ChronoDuration::seconds(60))).is_expired(now));
        assert!(token(Some(now - ChronoDuration::seconds(1))).is_expired(now));
    }

    #[test]
    fn test_apply_keeps_refresh_token_when_absent() {
        let now = Utc::now();
        let mut t = token(None);
        t.apply(
            TokenResponse {
                access_token: "ya29.new".into(),
                expires_in: Some(3599),
                refresh_token: None,
            },
            now,
        );
        assert_eq!(t.token, "ya29.new");
        assert_eq!(t.refresh_token.as_deref(), Some("1//refresh"));
        assert_eq!(t.expiry, Some(now + ChronoDuration::seconds(3599)));
    }

    #[test]
    fn test_token_file_format_round_trip() {
        let json = r#"{
            "token": "ya29.a0",
            "refresh_token": "1//0g",
            "token_uri": "https://oauth2.googleapis.com/token",
            "client_id": "123.apps.googleusercontent.com",
            "client_secret": "GOCSPX-x",
            "scopes": ["https://www.googleapis.com/auth/spreadsheets.readonly"],
            "universe_domain": "googleapis.com",
            "account": "",
            "expiry": "2025-06-01T12:00:00.123456Z"
        }"#;
        let parsed: StoredToken = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.token, "ya29.a0");
        assert!(parsed.can_refresh());
        assert!(parsed.expiry.is_some());
    }

    #[test]
    fn test_client_config_sections() {
        let path = Path::new("credentials.json");
        let installed = ClientConfig::from_json(
            path,
            r#"{"installed": {"client_id": "a", "client_secret": "b",
                "redirect_uris": ["http://localhost"]}}"#,
        )
        .unwrap();
        assert_eq!(installed.client_id, "a");
        assert_eq!(installed.token_uri, DEFAULT_TOKEN_URI);

        let err = ClientConfig::from_json(path, r#"{"other": {}}"#).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials { .. }));
    }

    #[test]
    fn test_redirect_query_to_callback() {
        let query = |code: Option<&str>, state: Option<&str>, error: Option<&str>| RedirectQuery {
            code: code.map(String::from),
            state: state.map(String::from),
            error: error.map(String::from),
        };
        assert_eq!(
            query(Some("4/0Ab"), Some("xyz"), None).into_callback(),
            Some(Callback::Code {
                code: "4/0Ab".into(),
                state: Some("xyz".into())
            })
        );
        assert_eq!(
            query(None, Some("xyz"), Some("access_denied")).into_callback(),
            Some(Callback::Denied("access_denied".into()))
        );
        assert_eq!(RedirectQuery::default().into_callback(), None);
    }

    async fn send_in_pieces(port: u16, pieces: &[&str]) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", port)).await.unwrap();
        for (i, piece) in pieces.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            }
            stream.write_all(piece.as_bytes()).await.unwrap();
        }
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[tokio::test]
    async fn test_redirect_split_across_packets() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let waiting = tokio::spawn(async move { await_callback(listener, "xyz").await });

        let favicon = send_in_pieces(
            port,
            &["GET /favicon.ico HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"],
        )
        .await;
        assert!(favicon.starts_with("HTTP/1.1 200"));

        let page = send_in_pieces(
            port,
            &[
                "GET /?code=abc&st",
                "ate=xyz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
            ],
        )
        .await;
        assert!(page.contains(CALLBACK_PAGE));
        assert_eq!(waiting.await.unwrap().unwrap(), "abc");
    }

    #[tokio::test]
    async fn test_redirect_state_mismatch_and_denial() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let waiting = tokio::spawn(async move { await_callback(listener, "xyz").await });
        send_in_pieces(
            port,
            &["GET /?code=abc&state=other HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"],
        )
        .await;
        let err = waiting.await.unwrap().unwrap_err();
        assert!(matches!(err, AuthError::ConsentDenied(reason) if reason == "state mismatch"));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let waiting = tokio::spawn(async move { await_callback(listener, "xyz").await });
        send_in_pieces(
            port,
            &["GET /?error=access_denied&state=xyz HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n"],
        )
        .await;
        let err = waiting.await.unwrap().unwrap_err();
        assert!(matches!(err, AuthError::ConsentDenied(reason) if reason == "access_denied"));
    }

    #[test]
    fn test_consent_error_mentions_test_user() {
        let err = AuthError::ConsentDenied("access_denied".into());
        assert!(err.to_string().contains("add yourself as a test user"));
    }

    #[tokio::test]
    async fn test_valid_token_file_is_used_without_network() {
        let dir = TempDir::new().unwrap();
        let token_path = dir.path().join("token.json");
        let stored = token(Some(Utc::now() + ChronoDuration::hours(1)));
        std::fs::write(&token_path, serde_json::to_string(&stored).unwrap()).unwrap();

        let auth = OAuthAuthenticator::new(dir.path().join("credentials.json"), &token_path);
        assert_eq!(auth.access_token().await.unwrap(), "ya29.access");
        // Second call is served from the cache even after the file is gone
        std::fs::remove_file(&token_path).unwrap();
        assert_eq!(auth.access_token().await.unwrap(), "ya29.access");
    }

    #[tokio::test]
    async fn test_missing_credentials_is_reported() {
        let dir = TempDir::new().unwrap();
        let auth = OAuthAuthenticator::new(
            dir.path().join("credentials.json"),
            dir.path().join("token.json"),
        );
        let err = auth.access_token().await.unwrap_err();
        assert!(matches!(err, AuthError::MissingCredentials(_)));
        assert!(err.to_string().contains("credentials.json"));
    }

    #[tokio::test]
    async fn test_write_token_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let token_path = dir.path().join("nested").join("token.json");
        let auth = OAuthAuthenticator::new(dir.path().join("c.json"), &token_path);

        auth.write_token(&token(None)).await.unwrap();
        let text = std::fs::read_to_string(&token_path).unwrap();
        let back: StoredToken = serde_json::from_str(&text).unwrap();
        assert_eq!(back, token(None));
    }
}
