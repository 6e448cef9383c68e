//! External data fetcher.
//!
//! Wraps a [`SpreadsheetGateway`] with the failure policy the tools rely on:
//! range reads never fail (a failure is reported as [`SheetRead::Failed`]),
//! and structure sampling degrades per worksheet.

use crate::ports::spreadsheet::{SheetsError, SpreadsheetGateway};
use eventcrew_domain::{
    DocumentSummary, SampleRead, SheetRead, SpreadsheetMetadata, WorksheetOverview,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct DataFetcher {
    gateway: Arc<dyn SpreadsheetGateway>,
}

impl DataFetcher {
    pub fn new(gateway: Arc<dyn SpreadsheetGateway>) -> Self {
        Self { gateway }
    }

    /// Read a range. Empty ranges and failures are reported separately.
    pub async fn read_rows(&self, document_id: &str, range: &str) -> SheetRead {
        match self.gateway.get_values(document_id, range).await {
            Ok(table) => {
                debug!("Read {} rows from {} ({})", table.len(), range, document_id);
                SheetRead::from_table(table)
            }
            Err(e) => {
                warn!("Failed to read range '{}' of {}: {}", range, document_id, e);
                SheetRead::Failed(e.to_string())
            }
        }
    }

    pub async fn list_documents(&self) -> Result<Vec<DocumentSummary>, SheetsError> {
        self.gateway.list_documents().await.inspect_err(|e| {
            warn!("Failed to list spreadsheets: {}", e);
        })
    }

    /// Worksheets of a document, each with a best-effort sample of its first rows.
    pub async fn describe_structure(
        &self,
        document_id: &str,
    ) -> Result<(SpreadsheetMetadata, Vec<WorksheetOverview>), SheetsError> {
        let metadata = self
            .gateway
            .get_metadata(document_id)
            .await
            .inspect_err(|e| warn!("Failed to load metadata for {}: {}", document_id, e))?;

        // Samples are read concurrently; results keep worksheet order
        let overviews = join_all(metadata.worksheets.iter().map(|info| async move {
            let sample = SampleRead::from(self.read_rows(document_id, &info.sample_range()).await);
            WorksheetOverview {
                info: info.clone(),
                sample,
            }
        }))
        .await;

        Ok((metadata, overviews))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use eventcrew_domain::{SheetTable, WorksheetInfo};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockSheets {
        ranges: HashMap<String, Result<SheetTable, SheetsError>>,
        metadata: Result<SpreadsheetMetadata, SheetsError>,
        reads: Mutex<Vec<String>>,
    }

    impl MockSheets {
        fn new() -> Self {
            Self {
                ranges: HashMap::new(),
                metadata: Err(SheetsError::NotFound("doc".into())),
                reads: Mutex::new(Vec::new()),
            }
        }

        fn with_range(mut self, range: &str, result: Result<SheetTable, SheetsError>) -> Self {
            self.ranges.insert(range.to_string(), result);
            self
        }
    }

    #[async_trait]
    impl SpreadsheetGateway for MockSheets {
        async fn get_values(&self, _id: &str, range: &str) -> Result<SheetTable, SheetsError> {
            self.reads.lock().unwrap().push(range.to_string());
            self.ranges
                .get(range)
                .cloned()
                .unwrap_or(Ok(SheetTable::empty()))
        }

        async fn get_metadata(&self, _id: &str) -> Result<SpreadsheetMetadata, SheetsError> {
            self.metadata.clone()
        }

        async fn list_documents(&self) -> Result<Vec<DocumentSummary>, SheetsError> {
            Err(SheetsError::Authentication("token expired".into()))
        }
    }

    fn table() -> SheetTable {
        vec![vec!["Item", "Cost"], vec!["Hall", "900"]]
            .into_iter()
            .collect()
    }

    #[tokio::test]
    async fn test_read_rows_distinguishes_empty_and_failed() {
        let mock = MockSheets::new()
            .with_range("Budget!A1:B2", Ok(table()))
            .with_range("Broken!A1", Err(SheetsError::InvalidRequest("bad range".into())));
        let fetcher = DataFetcher::new(Arc::new(mock));

        assert_eq!(fetcher.read_rows("doc", "Budget!A1:B2").await, SheetRead::Rows(table()));
        assert_eq!(fetcher.read_rows("doc", "Empty!A1").await, SheetRead::Empty);
        match fetcher.read_rows("doc", "Broken!A1").await {
            SheetRead::Failed(msg) => assert!(msg.contains("bad range")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_list_documents_propagates_error() {
        let fetcher = DataFetcher::new(Arc::new(MockSheets::new()));
        let err = fetcher.list_documents().await.unwrap_err();
        assert!(matches!(err, SheetsError::Authentication(_)));
    }

    #[tokio::test]
    async fn test_describe_structure_samples_each_worksheet() {
        let mut mock = MockSheets::new()
            .with_range("'Budget'!A1:Z5", Ok(table()))
            .with_range("'Locked'!A1:Z5", Err(SheetsError::PermissionDenied("no".into())));
        mock.metadata = Ok(SpreadsheetMetadata {
            title: "Gala".into(),
            worksheets: ["Budget", "Notes", "Locked"]
                .into_iter()
                .map(|t| WorksheetInfo {
                    title: t.into(),
                    row_count: 100,
                    column_count: 10,
                })
                .collect(),
        });
        let mock = Arc::new(mock);
        let fetcher = DataFetcher::new(mock.clone());

        let (meta, overviews) = fetcher.describe_structure("doc").await.unwrap();
        assert_eq!(meta.title, "Gala");
        assert_eq!(overviews[0].sample, SampleRead::Rows(table()));
        assert_eq!(overviews[1].sample, SampleRead::Empty);
        assert_eq!(overviews[2].sample, SampleRead::Unavailable);
        assert_eq!(
            *mock.reads.lock().unwrap(),
            vec!["'Budget'!A1:Z5", "'Notes'!A1:Z5", "'Locked'!A1:Z5"]
        );
    }

    #[tokio::test]
    async fn test_describe_structure_fails_without_metadata() {
        let fetcher = DataFetcher::new(Arc::new(MockSheets::new()));
        assert!(fetcher.describe_structure("doc").await.is_err());
    }
}
