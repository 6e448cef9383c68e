//! Table rendering for spreadsheet-backed tool output.

use crate::sheet::SheetTable;
use std::fmt::Write;

/// Row limit used by the spreadsheet read tool.
pub const DEFAULT_ROW_LIMIT: usize = 15;
/// Row limit used when sheet rows are appended to an event plan.
pub const LEGACY_ROW_LIMIT: usize = 10;

/// Cell delimiter within a rendered row.
pub const CELL_DELIMITER: &str = " | ";

/// Line layout of a rendered table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableLayout {
    /// `Headers: a | b` then `Row 1: ...`
    #[default]
    Compact,
    /// Numbered header cells under `📋 Headers:`, data under `📄 Data:`,
    /// indented and with right-aligned row numbers.
    Indexed,
}

/// Renders a [`SheetTable`] as text.
///
/// The first row is the header row. Data rows are numbered from 1 and at most
/// `row_limit` of them are shown; if more exist a single summary line reports
/// how many were omitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRenderer {
    pub row_limit: usize,
    pub layout: TableLayout,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_ROW_LIMIT)
    }
}

impl TableRenderer {
    pub fn new(row_limit: usize) -> Self {
        Self {
            row_limit,
            layout: TableLayout::Compact,
        }
    }

    pub fn with_layout(mut self, layout: TableLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Number of data rows left out by the row limit.
    pub fn omitted(&self, table: &SheetTable) -> usize {
        table.data_rows().len().saturating_sub(self.row_limit)
    }

    pub fn render(&self, table: &SheetTable) -> String {
        let mut out = String::new();
        let Some(headers) = table.headers() else {
            return out;
        };

        match self.layout {
            TableLayout::Compact => {
                let _ = writeln!(out, "Headers: {}", headers.join(CELL_DELIMITER));
            }
            TableLayout::Indexed => {
                let numbered: Vec<String> = headers
                    .iter()
                    .enumerate()
                    .map(|(j, cell)| format!("{:2}. {}", j + 1, cell))
                    .collect();
                out.push_str("📋 Headers:\n");
                let _ = writeln!(out, "  {}", numbered.join(CELL_DELIMITER));
                out.push_str("\n📄 Data:\n");
            }
        }

        for (i, row) in table.data_rows().iter().take(self.row_limit).enumerate() {
            let cells = row.join(CELL_DELIMITER);
            let _ = match self.layout {
                TableLayout::Compact => writeln!(out, "Row {}: {}", i + 1, cells),
                TableLayout::Indexed => writeln!(out, "  Row {:2}: {}", i + 1, cells),
            };
        }

        let omitted = self.omitted(table);
        if omitted > 0 {
            let _ = match self.layout {
                TableLayout::Compact => writeln!(out, "... and {} more rows", omitted),
                TableLayout::Indexed => writeln!(out, "  ... and {} more rows", omitted),
            };
        }

        out
    }
}
