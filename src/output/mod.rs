//! Report rendering
//!
//! This module turns a walked item tree into reports:
//! - An aligned console listing
//! - A styled spreadsheet
//! - JSON output
//!
//! # Module Structure
//!
//! - `config` - Field selection and output configuration
//! - `text` - Two-pass console listing
//! - `table` - Spreadsheet layout
//! - `style` - Cell formats used by the spreadsheet
//! - `document` - Spreadsheet writer trait and its backends
//! - `json` - JSON output

mod config;
mod document;
mod json;
mod style;
mod table;
mod text;

pub use config::{ColorMode, Field, FieldSet, OutputConfig, should_use_color};
pub use document::{
    CellRange, CellValue, GridCell, GridDocument, SHEET_NAME, SheetWriter, XlsxDocument,
};
pub use json::{print_json, to_json};
pub use style::{
    Alignment, Border, BorderLine, Borders, CellFormat, Fill, FillPattern, Font,
    HorizontalAlign, Rgb,
};
pub use table::{HEADER_ROWS, TableLayout, TableSummary, render_table};
pub use text::{ColumnWidths, SEPARATOR, TextFormatter, render_text};
