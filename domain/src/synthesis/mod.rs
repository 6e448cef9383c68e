//! Response synthesis: deterministic text rendering for tool output.
//!
//! Every handler that emits a table, a checklist or an amount goes through
//! these helpers, so identical inputs always produce byte-identical text.

pub mod checklist;
pub mod money;
pub mod table;

pub use checklist::{CategoryTable, render_bullets, render_checklist};
pub use money::{format_money, format_percent, title_case};
pub use table::{
    CELL_DELIMITER, DEFAULT_ROW_LIMIT, LEGACY_ROW_LIMIT, TableLayout, TableRenderer,
};
