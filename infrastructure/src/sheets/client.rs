//! Google Sheets v4 / Drive v3 REST client.

use async_trait::async_trait;
use eventcrew_application::ports::spreadsheet::{SheetsError, SpreadsheetGateway};
use eventcrew_domain::{DocumentSummary, SheetTable, SpreadsheetMetadata};
use reqwest::{Client as HttpClient, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use super::oauth::{AuthError, OAuthAuthenticator};
use super::wire::{ErrorEnvelope, FileList, Spreadsheet, ValueRange};

pub const SHEETS_BASE_URL: &str = "https://sheets.googleapis.com/v4/";
pub const DRIVE_BASE_URL: &str = "https://www.googleapis.com/drive/v3/";

const SPREADSHEET_MIME_QUERY: &str = "mimeType='application/vnd.google-apps.spreadsheet'";
const LIST_PAGE_SIZE: &str = "20";
const LIST_FIELDS: &str = "files(id, name, createdTime, modifiedTime, owners)";
const METADATA_FIELDS: &str = "properties.title,sheets.properties(title,gridProperties(rowCount,columnCount))";

/// How requests are authorised.
#[derive(Clone)]
pub enum SheetsAuth {
    /// API key; reads public spreadsheets only and cannot list a drive.
    ApiKey(String),
    /// User token from the installed-app OAuth flow.
    OAuth(Arc<OAuthAuthenticator>),
}

impl From<AuthError> for SheetsError {
    fn from(e: AuthError) -> Self {
        SheetsError::Authentication(e.to_string())
    }
}

pub struct GoogleSheetsClient {
    http_client: HttpClient,
    auth: SheetsAuth,
    sheets_base: Url,
    drive_base: Url,
}

impl GoogleSheetsClient {
    pub fn new(auth: SheetsAuth) -> Result<Self, SheetsError> {
        Self::with_base_urls(auth, SHEETS_BASE_URL, DRIVE_BASE_URL)
    }

    pub fn with_base_urls(
        auth: SheetsAuth,
        sheets_base: &str,
        drive_base: &str,
    ) -> Result<Self, SheetsError> {
        let parse = |url: &str| {
            Url::parse(url).map_err(|e| SheetsError::InvalidRequest(format!("{}: {}", url, e)))
        };
        Ok(Self {
            http_client: HttpClient::new(),
            auth,
            sheets_base: parse(sheets_base)?,
            drive_base: parse(drive_base)?,
        })
    }

    /// `{base}spreadsheets/{id}/values/{range}` with each segment percent-encoded.
    fn values_url(&self, document_id: &str, range: &str) -> Result<Url, SheetsError> {
        self.sheets_url(&[document_id, "values", range])
    }

    fn sheets_url(&self, segments: &[&str]) -> Result<Url, SheetsError> {
        let mut url = self.sheets_base.clone();
        url.path_segments_mut()
            .map_err(|_| SheetsError::InvalidRequest("base URL cannot hold a path".to_string()))?
            .pop_if_empty()
            .push("spreadsheets")
            .extend(segments);
        Ok(url)
    }

    async fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, SheetsError> {
        match &self.auth {
            SheetsAuth::ApiKey(key) => Ok(request.query(&[("key", key.as_str())])),
            SheetsAuth::OAuth(auth) => Ok(request.bearer_auth(auth.access_token().await?)),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, SheetsError> {
        debug!("GET {}", url);
        let request = self.authorize(self.http_client.get(url).query(query)).await?;
        let response = request
            .send()
            .await
            .map_err(|e| SheetsError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status == StatusCode::UNAUTHORIZED
                && let SheetsAuth::OAuth(auth) = &self.auth
            {
                auth.invalidate().await;
            }
            return Err(status_error(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| SheetsError::InvalidResponse(e.to_string()))
    }
}

fn status_error(status: StatusCode, body: &str) -> SheetsError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|env| match env.error.status {
            Some(code) if !env.error.message.is_empty() => {
                format!("{} ({})", env.error.message, code)
            }
            _ if !env.error.message.is_empty() => env.error.message,
            _ => format!("HTTP {}", status),
        })
        .unwrap_or_else(|_| format!("HTTP {}", status));

    match status {
        StatusCode::UNAUTHORIZED => SheetsError::Authentication(message),
        StatusCode::FORBIDDEN => SheetsError::PermissionDenied(message),
        StatusCode::NOT_FOUND => SheetsError::NotFound(message),
        StatusCode::TOO_MANY_REQUESTS => SheetsError::RateLimited(message),
        StatusCode::BAD_REQUEST => SheetsError::InvalidRequest(message),
        _ => SheetsError::InvalidResponse(message),
    }
}

#[async_trait]
impl SpreadsheetGateway for GoogleSheetsClient {
    async fn get_values(&self, document_id: &str, range: &str) -> Result<SheetTable, SheetsError> {
        let url = self.values_url(document_id, range)?;
        let values: ValueRange = self.get_json(url, &[]).await?;
        Ok(values.into())
    }

    async fn get_metadata(&self, document_id: &str) -> Result<SpreadsheetMetadata, SheetsError> {
        let url = self.sheets_url(&[document_id])?;
        let sheet: Spreadsheet = self.get_json(url, &[("fields", METADATA_FIELDS)]).await?;
        Ok(sheet.into())
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, SheetsError> {
        if let SheetsAuth::ApiKey(_) = self.auth {
            return Err(SheetsError::NotConfigured(
                "listing spreadsheets needs OAuth credentials, an API key only reads public sheets"
                    .to_string(),
            ));
        }

        let url = self
            .drive_base
            .join("files")
            .map_err(|e| SheetsError::InvalidRequest(e.to_string()))?;
        let list: FileList = self
            .get_json(
                url,
                &[
                    ("q", SPREADSHEET_MIME_QUERY),
                    ("pageSize", LIST_PAGE_SIZE),
                    ("fields", LIST_FIELDS),
                ],
            )
            .await?;
        Ok(list.files.into_iter().map(DocumentSummary::from).collect())
    }
}

/// Stand-in used when no Google credentials are configured.
pub struct UnconfiguredSheets {
    reason: String,
}

impl UnconfiguredSheets {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> SheetsError {
        SheetsError::NotConfigured(self.reason.clone())
    }
}

#[async_trait]
impl SpreadsheetGateway for UnconfiguredSheets {
    async fn get_values(&self, _document_id: &str, _range: &str) -> Result<SheetTable, SheetsError> {
        Err(self.error())
    }

    async fn get_metadata(&self, _document_id: &str) -> Result<SpreadsheetMetadata, SheetsError> {
        Err(self.error())
    }

    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, SheetsError> {
        Err(self.error())
    }
}
