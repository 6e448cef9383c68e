//! Spreadsheet data as seen by the tools: tables, document listings and
//! worksheet structure.

use serde::{Deserialize, Serialize};

/// Row-major table of cell text returned by a range read.
///
/// Rows are independently lengthed; the first row is treated as the header
/// row when present. No type coercion is performed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTable {
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn headers(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Every row after the header row.
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// Total row count, header included.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<R, C> FromIterator<R> for SheetTable
where
    R: IntoIterator<Item = C>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// Outcome of a range read.
///
/// An empty range and a failed read are reported separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetRead {
    Rows(SheetTable),
    Empty,
    Failed(String),
}

impl SheetRead {
    /// Classify a successfully fetched table.
    pub fn from_table(table: SheetTable) -> Self {
        if table.is_empty() {
            SheetRead::Empty
        } else {
            SheetRead::Rows(table)
        }
    }
}

/// One spreadsheet document found in the operator's drive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_time: Option<String>,
    #[serde(default)]
    pub modified_time: Option<String>,
    /// Owner email addresses
    #[serde(default)]
    pub owners: Vec<String>,
}

impl DocumentSummary {
    pub fn url(&self) -> String {
        spreadsheet_url(&self.id)
    }

    pub fn primary_owner(&self) -> Option<&str> {
        self.owners.first().map(String::as_str)
    }
}

/// Browser URL for a spreadsheet id.
pub fn spreadsheet_url(id: &str) -> String {
    format!("https://docs.google.com/spreadsheets/d/{}", id)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetMetadata {
    pub title: String,
    pub worksheets: Vec<WorksheetInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorksheetInfo {
    pub title: String,
    pub row_count: u64,
    pub column_count: u64,
}

impl WorksheetInfo {
    /// Range covering the top-left sample block of this worksheet.
    ///
    /// The title is always quoted so names like `Q1`, `A!B` or `Bob's` stay
    /// one sheet reference.
    pub fn sample_range(&self) -> String {
        format!("'{}'!A1:Z5", self.title.replace('\'', "''"))
    }
}

/// Best-effort sample of a worksheet's first rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SampleRead {
    Rows(SheetTable),
    Empty,
    Unavailable,
}

impl From<SheetRead> for SampleRead {
    fn from(read: SheetRead) -> Self {
        match read {
            SheetRead::Rows(table) => SampleRead::Rows(table),
            SheetRead::Empty => SampleRead::Empty,
            SheetRead::Failed(_) => SampleRead::Unavailable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetOverview {
    pub info: WorksheetInfo,
    pub sample: SampleRead,
}
