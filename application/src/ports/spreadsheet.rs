//! Spreadsheet gateway port
//!
//! Read-only access to a spreadsheet backend: cell ranges, document
//! structure, and the documents visible to the operator.

use async_trait::async_trait;
use eventcrew_domain::{DocumentSummary, SheetTable, SpreadsheetMetadata};
use thiserror::Error;

/// Errors from the spreadsheet backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetsError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Spreadsheet not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    InvalidResponse(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),
}

/// Port for reading spreadsheets
#[async_trait]
pub trait SpreadsheetGateway: Send + Sync {
    /// Cell text for `range` (`Sheet1!A1:D10`, `Data!A:A`, `Sheet1`)
    async fn get_values(&self, document_id: &str, range: &str) -> Result<SheetTable, SheetsError>;

    /// Title and worksheet sizes
    async fn get_metadata(&self, document_id: &str) -> Result<SpreadsheetMetadata, SheetsError>;

    /// Spreadsheet documents visible to the authenticated user
    async fn list_documents(&self) -> Result<Vec<DocumentSummary>, SheetsError>;
}
