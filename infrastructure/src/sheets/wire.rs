//! Google Sheets v4 / Drive v3 response bodies.
//!
//! Only the fields eventcrew reads are modelled; everything else is ignored.

use eventcrew_domain::{DocumentSummary, SheetTable, SpreadsheetMetadata, WorksheetInfo};
use serde::Deserialize;
use serde_json::Value;

/// `spreadsheets.values.get`
#[derive(Debug, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl From<ValueRange> for SheetTable {
    fn from(range: ValueRange) -> Self {
        range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text))
            .collect()
    }
}

/// Formatted cells arrive as strings; anything else is rendered as JSON text.
fn cell_text(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `spreadsheets.get` restricted to titles and grid sizes.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    #[serde(default)]
    pub properties: SpreadsheetProperties,
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpreadsheetProperties {
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    pub title: String,
    #[serde(default)]
    pub grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    #[serde(default)]
    pub row_count: u64,
    #[serde(default)]
    pub column_count: u64,
}

impl From<Spreadsheet> for SpreadsheetMetadata {
    fn from(sheet: Spreadsheet) -> Self {
        SpreadsheetMetadata {
            title: sheet
                .properties
                .title
                .unwrap_or_else(|| "Unknown".to_string()),
            worksheets: sheet
                .sheets
                .into_iter()
                .map(|s| WorksheetInfo {
                    title: s.properties.title,
                    row_count: s.properties.grid_properties.row_count,
                    column_count: s.properties.grid_properties.column_count,
                })
                .collect(),
        }
    }
}

/// `files.list`
#[derive(Debug, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub modified_time: Option<String>,
    #[serde(default)]
    pub owners: Vec<Owner>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    #[serde(default)]
    pub email_address: Option<String>,
}

impl From<DriveFile> for DocumentSummary {
    fn from(file: DriveFile) -> Self {
        DocumentSummary {
            id: file.id,
            name: file.name,
            created_time: file.created_time,
            modified_time: file.modified_time,
            owners: file
                .owners
                .into_iter()
                .map(|o| o.email_address.unwrap_or_else(|| "Unknown".to_string()))
                .collect(),
        }
    }
}

/// Error envelope shared by Google APIs: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_range_to_table() {
        let range: ValueRange = serde_json::from_str(
            r#"{"range": "Guests!A1:C3", "majorDimension": "ROWS",
                "values": [["Name", "Seats"], ["Ana", 2], ["Bo"]]}"#,
        )
        .unwrap();
        let table = SheetTable::from(range);
        assert_eq!(table.len(), 3);
        assert_eq!(table.data_rows()[0], vec!["Ana", "2"]);
        assert_eq!(table.data_rows()[1], vec!["Bo"]);
    }

    #[test]
    fn test_missing_values_is_empty() {
        let range: ValueRange = serde_json::from_str(r#"{"range": "Empty!A1:B2"}"#).unwrap();
        assert!(SheetTable::from(range).is_empty());
    }

    #[test]
    fn test_spreadsheet_metadata() {
        let sheet: Spreadsheet = serde_json::from_str(
            r#"{"properties": {"title": "Gala 2025"},
                "sheets": [
                  {"properties": {"title": "Guests", "gridProperties": {"rowCount": 1000, "columnCount": 26}}},
                  {"properties": {"title": "Notes"}}
                ]}"#,
        )
        .unwrap();
        let metadata = SpreadsheetMetadata::from(sheet);
        assert_eq!(metadata.title, "Gala 2025");
        assert_eq!(metadata.worksheets[0].row_count, 1000);
        assert_eq!(metadata.worksheets[0].column_count, 26);
        assert_eq!(metadata.worksheets[1].row_count, 0);
    }

    #[test]
    fn test_drive_file_owner() {
        let list: FileList = serde_json::from_str(
            r#"{"files": [{"id": "1", "name": "Budget",
                "modifiedTime": "2025-01-02T03:04:05.000Z",
                "owners": [{"displayName": "Chair", "emailAddress": "chair@example.org"}]}]}"#,
        )
        .unwrap();
        let doc = DocumentSummary::from(list.files.into_iter().next().unwrap());
        assert_eq!(doc.primary_owner(), Some("chair@example.org"));
        assert_eq!(doc.modified_time.as_deref(), Some("2025-01-02T03:04:05.000Z"));
        assert_eq!(doc.created_time, None);
    }
}
