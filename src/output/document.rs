//! Spreadsheet documents the table report writes into
//!
//! The table renderer only needs a handful of operations, captured by
//! [`SheetWriter`]. Two backends implement it:
//!
//! - [`XlsxDocument`] writes a real `.xlsx` workbook
//! - [`GridDocument`] records everything in memory for inspection

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};

use crate::error::RenderError;

use super::style::{Border, BorderLine, CellFormat, FillPattern, HorizontalAlign};

/// Name of the single worksheet of a report.
pub const SHEET_NAME: &str = "Items";

/// One sheet of styled cells.
pub trait SheetWriter {
    fn write_text(
        &mut self,
        row: u32,
        col: u16,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError>;

    fn write_number(
        &mut self,
        row: u32,
        col: u16,
        value: f64,
        format: &CellFormat,
    ) -> Result<(), RenderError>;

    fn write_blank(&mut self, row: u32, col: u16, format: &CellFormat) -> Result<(), RenderError>;

    /// Merge a rectangle spanning at least two cells and put `text` in it.
    fn merge(
        &mut self,
        range: CellRange,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError>;

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), RenderError>;

    /// Persist the document.
    fn save(&mut self) -> Result<(), RenderError>;
}

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub first_row: u32,
    pub first_col: u16,
    pub last_row: u32,
    pub last_col: u16,
}

impl CellRange {
    /// A column slice from `first_row` to `last_row`.
    pub fn column(col: u16, first_row: u32, last_row: u32) -> Self {
        Self {
            first_row,
            first_col: col,
            last_row,
            last_col: col,
        }
    }
}

/// `.xlsx` workbook with a single worksheet.
pub struct XlsxDocument {
    path: PathBuf,
    workbook: Workbook,
}

impl XlsxDocument {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().set_name(SHEET_NAME)?;
        Ok(Self {
            path: path.into(),
            workbook,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn sheet(&mut self) -> Result<&mut Worksheet, RenderError> {
        Ok(self.workbook.worksheet_from_index(0)?)
    }
}

impl SheetWriter for XlsxDocument {
    fn write_text(
        &mut self,
        row: u32,
        col: u16,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        let format = to_xlsx_format(format);
        self.sheet()?
            .write_string_with_format(row, col, text, &format)?;
        Ok(())
    }

    fn write_number(
        &mut self,
        row: u32,
        col: u16,
        value: f64,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        let format = to_xlsx_format(format);
        self.sheet()?
            .write_number_with_format(row, col, value, &format)?;
        Ok(())
    }

    fn write_blank(&mut self, row: u32, col: u16, format: &CellFormat) -> Result<(), RenderError> {
        let format = to_xlsx_format(format);
        self.sheet()?.write_blank(row, col, &format)?;
        Ok(())
    }

    fn merge(
        &mut self,
        range: CellRange,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        let format = to_xlsx_format(format);
        self.sheet()?.merge_range(
            range.first_row,
            range.first_col,
            range.last_row,
            range.last_col,
            text,
            &format,
        )?;
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), RenderError> {
        self.sheet()?.set_column_width(col, width)?;
        Ok(())
    }

    fn save(&mut self) -> Result<(), RenderError> {
        self.workbook.save(&self.path)?;
        Ok(())
    }
}

fn to_xlsx_format(style: &CellFormat) -> Format {
    let mut format = Format::new();

    if style.font.bold {
        format = format.set_bold();
    }
    if let Some(color) = style.font.color {
        format = format.set_font_color(Color::RGB(color.0));
    }

    if style.fill.pattern == FillPattern::Solid {
        format = format
            .set_pattern(FormatPattern::Solid)
            .set_background_color(Color::RGB(style.fill.color.0));
    }

    format = match style.alignment.horizontal {
        HorizontalAlign::General => format,
        HorizontalAlign::Left => format.set_align(FormatAlign::Left),
        HorizontalAlign::Center => format
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter),
        HorizontalAlign::Right => format.set_align(FormatAlign::Right),
    };

    let borders = &style.borders;
    if borders.top.is_visible() {
        format = format
            .set_border_top(border_line(&borders.top))
            .set_border_top_color(Color::RGB(borders.top.color.0));
    }
    if borders.bottom.is_visible() {
        format = format
            .set_border_bottom(border_line(&borders.bottom))
            .set_border_bottom_color(Color::RGB(borders.bottom.color.0));
    }
    if borders.left.is_visible() {
        format = format
            .set_border_left(border_line(&borders.left))
            .set_border_left_color(Color::RGB(borders.left.color.0));
    }
    if borders.right.is_visible() {
        format = format
            .set_border_right(border_line(&borders.right))
            .set_border_right_color(Color::RGB(borders.right.color.0));
    }

    format
}

fn border_line(border: &Border) -> FormatBorder {
    match border.line {
        BorderLine::None => FormatBorder::None,
        BorderLine::Thin => FormatBorder::Thin,
        BorderLine::Medium => FormatBorder::Medium,
    }
}

/// Content of one recorded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub value: CellValue,
    pub format: CellFormat,
}

impl GridCell {
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            CellValue::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// In-memory sheet. Later writes to a cell replace earlier ones.
#[derive(Debug, Default)]
pub struct GridDocument {
    cells: BTreeMap<(u32, u16), GridCell>,
    merges: Vec<CellRange>,
    widths: BTreeMap<u16, f64>,
    saved: bool,
}

impl GridDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: u32, col: u16) -> Option<&GridCell> {
        self.cells.get(&(row, col))
    }

    pub fn text(&self, row: u32, col: u16) -> Option<&str> {
        self.cell(row, col).and_then(GridCell::text)
    }

    pub fn format(&self, row: u32, col: u16) -> Option<&CellFormat> {
        self.cell(row, col).map(|c| &c.format)
    }

    pub fn merges(&self) -> &[CellRange] {
        &self.merges
    }

    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.widths.get(&col).copied()
    }

    /// One past the last written row.
    pub fn row_count(&self) -> u32 {
        self.cells.keys().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }

    /// One past the last written column.
    pub fn column_count(&self) -> u16 {
        self.cells.keys().map(|&(_, c)| c + 1).max().unwrap_or(0)
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    fn put(&mut self, row: u32, col: u16, value: CellValue, format: &CellFormat) {
        self.cells.insert(
            (row, col),
            GridCell {
                value,
                format: format.clone(),
            },
        );
    }
}

impl SheetWriter for GridDocument {
    fn write_text(
        &mut self,
        row: u32,
        col: u16,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        self.put(row, col, CellValue::Text(text.to_string()), format);
        Ok(())
    }

    fn write_number(
        &mut self,
        row: u32,
        col: u16,
        value: f64,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        self.put(row, col, CellValue::Number(value), format);
        Ok(())
    }

    fn write_blank(&mut self, row: u32, col: u16, format: &CellFormat) -> Result<(), RenderError> {
        self.put(row, col, CellValue::Blank, format);
        Ok(())
    }

    fn merge(
        &mut self,
        range: CellRange,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        debug_assert!(
            range.first_row != range.last_row || range.first_col != range.last_col,
            "single cell merge"
        );
        for row in range.first_row..=range.last_row {
            for col in range.first_col..=range.last_col {
                self.put(row, col, CellValue::Blank, format);
            }
        }
        self.put(
            range.first_row,
            range.first_col,
            CellValue::Text(text.to_string()),
            format,
        );
        self.merges.push(range);
        Ok(())
    }

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), RenderError> {
        self.widths.insert(col, width);
        Ok(())
    }

    fn save(&mut self) -> Result<(), RenderError> {
        self.saved = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_grid_records_cells_and_merges() {
        let mut grid = GridDocument::new();
        grid.merge(CellRange::column(0, 0, 1), "Root", &CellFormat::header())
            .unwrap();
        grid.write_text(2, 0, "docs", &CellFormat::directory()).unwrap();
        grid.write_number(2, 1, 12.0, &CellFormat::directory()).unwrap();
        grid.write_blank(3, 0, &CellFormat::connector()).unwrap();

        assert_eq!(grid.text(0, 0), Some("Root"));
        assert_eq!(grid.cell(1, 0).unwrap().value, CellValue::Blank);
        assert_eq!(grid.merges(), &[CellRange::column(0, 0, 1)]);
        assert_eq!(grid.cell(2, 1).unwrap().value, CellValue::Number(12.0));
        assert_eq!(grid.format(3, 0), Some(&CellFormat::connector()));
        assert_eq!(grid.row_count(), 4);
        assert_eq!(grid.column_count(), 2);
    }

    #[test]
    fn test_grid_later_write_wins() {
        let mut grid = GridDocument::new();
        grid.write_blank(5, 2, &CellFormat::new()).unwrap();
        grid.write_text(5, 2, "x", &CellFormat::connector()).unwrap();
        assert_eq!(grid.text(5, 2), Some("x"));
        assert!(!grid.is_saved());
        grid.save().unwrap();
        assert!(grid.is_saved());
    }

    #[test]
    fn test_xlsx_document_saves_a_zip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.xlsx");
        let mut doc = XlsxDocument::create(&path).unwrap();
        doc.merge(CellRange::column(0, 0, 1), "Root", &CellFormat::header())
            .unwrap();
        doc.write_text(2, 0, "a.txt", &CellFormat::file()).unwrap();
        doc.write_number(2, 1, 10.0, &CellFormat::file()).unwrap();
        doc.write_blank(3, 0, &CellFormat::footer()).unwrap();
        doc.set_column_width(0, 12.0).unwrap();
        doc.save().unwrap();

        let bytes = fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"), "xlsx files are zip archives");
        assert_eq!(doc.path(), path.as_path());
    }

    #[test]
    fn test_xlsx_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let mut doc = XlsxDocument::create(dir.path().join("nope/out.xlsx")).unwrap();
        doc.write_text(0, 0, "x", &CellFormat::new()).unwrap();
        assert!(doc.save().is_err());
    }
}
