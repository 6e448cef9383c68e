//! Spreadsheet domain.
//!
//! - [`SheetTable`]: row-major cell text from a range read
//! - [`SheetRead`]: rows, empty, or failed
//! - [`DocumentSummary`], [`SpreadsheetMetadata`], [`WorksheetOverview`]: listing and structure

pub mod entities;

pub use entities::{
    DocumentSummary, SampleRead, SheetRead, SheetTable, SpreadsheetMetadata, WorksheetInfo,
    WorksheetOverview, spreadsheet_url,
};
