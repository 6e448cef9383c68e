//! Spreadsheet tools: sheets_read_data, sheets_list_available, sheets_explore_structure
//!
//! All three go through the [`DataFetcher`](eventcrew_application::DataFetcher);
//! failures come back as a single `❌` line rather than an error.

use async_trait::async_trait;
use eventcrew_application::ports::tool_handler::{ToolContext, ToolHandler};
use eventcrew_domain::sheet::spreadsheet_url;
use eventcrew_domain::synthesis::{DEFAULT_ROW_LIMIT, TableLayout, TableRenderer};
use eventcrew_domain::{SampleRead, SheetRead, ToolCall, ToolDefinition, ToolParameter};
use std::fmt::Write;

/// Tool name constants
pub const READ_DATA: &str = "sheets_read_data";
pub const LIST_AVAILABLE: &str = "sheets_list_available";
pub const EXPLORE_STRUCTURE: &str = "sheets_explore_structure";

pub struct ReadData;

#[async_trait]
impl ToolHandler for ReadData {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(READ_DATA, "Read data from a Google Sheets spreadsheet")
            .with_parameter(ToolParameter::new(
                "spreadsheet_id",
                "Google Sheets spreadsheet ID",
                true,
            ))
            .with_parameter(ToolParameter::new(
                "range_name",
                "Range to read (e.g., 'Sheet1!A1:D10')",
                true,
            ))
    }

    async fn handle(&self, call: &ToolCall, ctx: &ToolContext) -> String {
        let id = call.string_or("spreadsheet_id", "");
        let range = call.string_or("range_name", "");

        match ctx.fetcher.read_rows(id, range).await {
            SheetRead::Rows(table) => {
                let renderer =
                    TableRenderer::new(DEFAULT_ROW_LIMIT).with_layout(TableLayout::Indexed);
                format!(
                    "📊 Retrieved {} rows from {}\n\n{}",
                    table.len(),
                    range,
                    renderer.render(&table)
                )
            }
            SheetRead::Empty => "❌ No data found in the specified range".to_string(),
            SheetRead::Failed(e) => format!("❌ Error reading spreadsheet: {}", e),
        }
    }
}

pub struct ListAvailable;

#[async_trait]
impl ToolHandler for ListAvailable {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            LIST_AVAILABLE,
            "List all available Google Sheets in the user's account",
        )
    }

    async fn handle(&self, _call: &ToolCall, ctx: &ToolContext) -> String {
        let documents = match ctx.fetcher.list_documents().await {
            Ok(documents) => documents,
            Err(e) => return format!("❌ Error listing sheets: {}", e),
        };

        if documents.is_empty() {
            return "❌ No Google Sheets found in your account".to_string();
        }

        let mut response = format!("📋 Found {} Google Sheets:\n\n", documents.len());
        for (i, doc) in documents.iter().enumerate() {
            let _ = writeln!(response, "{:2}. {}", i + 1, doc.name);
            let _ = writeln!(response, "    ID: {}", doc.id);
            let _ = writeln!(response, "    URL: {}", doc.url());
            let _ = writeln!(
                response,
                "    Modified: {}",
                doc.modified_time.as_deref().unwrap_or("Unknown")
            );
            if let Some(owner) = doc.primary_owner() {
                let _ = writeln!(response, "    Owner: {}", owner);
            }
            response.push('\n');
        }

        response
    }
}

pub struct ExploreStructure;

#[async_trait]
impl ToolHandler for ExploreStructure {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            EXPLORE_STRUCTURE,
            "Explore the structure of a Google Sheets spreadsheet",
        )
        .with_parameter(ToolParameter::new(
            "spreadsheet_id",
            "Google Sheets spreadsheet ID",
            true,
        ))
    }

    async fn handle(&self, call: &ToolCall, ctx: &ToolContext) -> String {
        let id = call.string_or("spreadsheet_id", "");

        let (metadata, overviews) = match ctx.fetcher.describe_structure(id).await {
            Ok(structure) => structure,
            Err(e) => return format!("❌ Error exploring spreadsheet: {}", e),
        };

        let mut response = format!("🔍 Exploring: {}\n", metadata.title);
        let _ = writeln!(response, "🌐 URL: {}\n", spreadsheet_url(id));
        let _ = writeln!(response, "📋 Worksheets ({}):\n", overviews.len());

        for (i, overview) in overviews.iter().enumerate() {
            let info = &overview.info;
            let _ = writeln!(response, "  {}. {}", i + 1, info.title);
            let _ = writeln!(
                response,
                "     Size: {} rows × {} columns",
                info.row_count, info.column_count
            );

            match &overview.sample {
                SampleRead::Rows(sample) => {
                    let _ = writeln!(response, "     Sample data: {} rows found", sample.len());
                    if let Some(headers) = sample.headers() {
                        let _ = writeln!(response, "     Headers: {}", headers.join(", "));
                    }
                    if let Some(first) = sample.data_rows().first() {
                        let _ = writeln!(response, "     First row: {}", first.join(", "));
                    }
                }
                SampleRead::Empty => response.push_str("     No data found\n"),
                SampleRead::Unavailable => response.push_str("     Could not read sample data\n"),
            }
            response.push('\n');
        }

        response.push_str("💡 To read data, use sheets_read_data with specific range.\n");
        response.push_str("💡 Example ranges: 'Sheet1!A1:D10', 'Data!A:A', 'Sheet1' (entire sheet)");
        response
    }
}
