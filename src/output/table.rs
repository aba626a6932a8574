//! Spreadsheet report
//!
//! Layout of the sheet, for a root of depth `D`:
//!
//! ```text
//! col:   0      1 ..= D                D+1 ..            last+1
//! row 0  Root | Sub-item level n ... | field headers ... |
//! row 1  (header cells merged down over rows 0 and 1)    |
//! row 2  root name                   | field values      | closing
//! ...    one row per item, depth first                   | border
//! footer top border across columns 0 ..= last
//! ```
//!
//! An item's name goes in column `D - depth`. Every ancestor of a row owns
//! the cell in its own name column and draws a left border there, which
//! links each directory to the rows of its subtree.

use crate::error::RenderError;
use crate::tree::{ItemId, ItemTree};

use super::config::{Field, FieldSet};
use super::document::{CellRange, SheetWriter};
use super::style::CellFormat;

/// Rows taken by the header band.
pub const HEADER_ROWS: u32 = 2;

/// What a finished table occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    /// Data rows written, one per item.
    pub rows: u32,
    /// Columns holding names or fields; the closing column is not counted.
    pub columns: u16,
}

/// Column positions derived from the tree shape and the selected fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableLayout {
    pub root_depth: usize,
    pub fields: Vec<(Field, u16)>,
    pub last_column: u16,
}

impl TableLayout {
    pub fn new(tree: &ItemTree, fields: &FieldSet) -> Result<Self, RenderError> {
        let root_depth = tree.get(tree.root()).depth();
        let mut next = root_depth + 1;
        let mut columns = Vec::with_capacity(fields.len());
        for field in fields.iter() {
            columns.push((field, to_column(next)?));
            next += 1;
        }
        // One more column closes the table on the right.
        to_column(next)?;
        Ok(Self {
            root_depth,
            fields: columns,
            last_column: to_column(next - 1)?,
        })
    }

    /// Column of an item's name.
    pub fn name_column(&self, depth: usize) -> u16 {
        // Fits: every depth is at most the root depth, checked in `new`.
        self.root_depth.saturating_sub(depth) as u16
    }

    pub fn closing_column(&self) -> u16 {
        self.last_column + 1
    }
}

fn to_column(index: usize) -> Result<u16, RenderError> {
    u16::try_from(index).map_err(|_| RenderError::ColumnOutOfRange { column: index })
}

/// Write `tree` as a table into `writer` and save it.
pub fn render_table<W: SheetWriter>(
    tree: &ItemTree,
    fields: &FieldSet,
    log_parent_name: bool,
    writer: &mut W,
) -> Result<TableSummary, RenderError> {
    let mut renderer = TableRenderer::new(tree, fields, log_parent_name, writer)?;
    let summary = renderer.render()?;
    writer.save()?;
    Ok(summary)
}

struct TableRenderer<'a, W: SheetWriter> {
    tree: &'a ItemTree,
    log_parent_name: bool,
    writer: &'a mut W,
    layout: TableLayout,
    /// Widest text seen per column, in characters.
    widths: Vec<usize>,
    header: CellFormat,
    directory: CellFormat,
    file: CellFormat,
    connector: CellFormat,
    echo: CellFormat,
}

impl<'a, W: SheetWriter> TableRenderer<'a, W> {
    fn new(
        tree: &'a ItemTree,
        fields: &FieldSet,
        log_parent_name: bool,
        writer: &'a mut W,
    ) -> Result<Self, RenderError> {
        let layout = TableLayout::new(tree, fields)?;
        let widths = vec![0; layout.last_column as usize + 1];
        Ok(Self {
            tree,
            log_parent_name,
            writer,
            layout,
            widths,
            header: CellFormat::header(),
            directory: CellFormat::directory(),
            file: CellFormat::file(),
            connector: CellFormat::connector(),
            echo: CellFormat::new(),
        })
    }

    fn render(&mut self) -> Result<TableSummary, RenderError> {
        self.write_header()?;
        let last_row = self.write_item(self.tree.root(), HEADER_ROWS)?;
        self.write_footer(last_row)?;
        self.apply_widths()?;
        Ok(TableSummary {
            rows: last_row + 1 - HEADER_ROWS,
            columns: self.layout.last_column + 1,
        })
    }

    fn write_header(&mut self) -> Result<(), RenderError> {
        let header = self.header.clone();
        self.merge_header(0, "Root", &header)?;
        for level in 1..=self.layout.root_depth {
            let label = format!("Sub-item level {}", level);
            self.merge_header(level as u16, &label, &header)?;
        }
        for (field, col) in self.layout.fields.clone() {
            self.merge_header(col, field.label(), &header)?;
        }
        Ok(())
    }

    fn merge_header(
        &mut self,
        col: u16,
        label: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        self.track(col, label);
        self.writer
            .merge(CellRange::column(col, 0, HEADER_ROWS - 1), label, format)
    }

    /// Write `id` at `row` followed by its subtree. Returns the last row used.
    fn write_item(&mut self, id: ItemId, row: u32) -> Result<u32, RenderError> {
        let tree = self.tree;
        let item = tree.get(id);
        let col = self.layout.name_column(item.depth());
        let format = if item.is_dir() {
            self.directory.clone()
        } else {
            self.file.clone()
        };

        self.put_text(row, col, item.name(), &format)?;

        // Leading cells between the root column and this item's name.
        let echo = self.echo.clone();
        for lead in 1..col {
            if self.log_parent_name {
                self.put_text(row, lead, item.name(), &echo)?;
            } else {
                self.writer.write_blank(row, lead, &echo)?;
            }
        }

        for (field, field_col) in self.layout.fields.clone() {
            if field == Field::Size {
                self.track(field_col, &item.size().to_string());
                self.writer
                    .write_number(row, field_col, item.size() as f64, &format)?;
            } else {
                self.put_text(row, field_col, &field.value(item), &format)?;
            }
        }
        item.mark_visited();

        let mut last = row;
        for &child in item.children() {
            last = self.write_item(child, last + 1)?;
        }

        if last > row {
            let connector = self.connector.clone();
            for below in row + 1..=last {
                if self.log_parent_name {
                    self.put_text(below, col, item.name(), &connector)?;
                } else {
                    self.writer.write_blank(below, col, &connector)?;
                }
            }
        }

        Ok(last)
    }

    fn write_footer(&mut self, last_row: u32) -> Result<(), RenderError> {
        let footer = CellFormat::footer();
        for col in 0..=self.layout.last_column {
            self.writer.write_blank(last_row + 1, col, &footer)?;
        }
        let closing = CellFormat::closing();
        let closing_col = self.layout.closing_column();
        for row in 0..=last_row {
            self.writer.write_blank(row, closing_col, &closing)?;
        }
        Ok(())
    }

    fn apply_widths(&mut self) -> Result<(), RenderError> {
        for (col, &width) in self.widths.iter().enumerate() {
            if width > 0 {
                self.writer
                    .set_column_width(col as u16, (width + 2) as f64)?;
            }
        }
        Ok(())
    }

    fn put_text(
        &mut self,
        row: u32,
        col: u16,
        text: &str,
        format: &CellFormat,
    ) -> Result<(), RenderError> {
        self.track(col, text);
        self.writer.write_text(row, col, text, format)
    }

    fn track(&mut self, col: u16, text: &str) {
        if let Some(width) = self.widths.get_mut(col as usize) {
            *width = (*width).max(text.chars().count());
        }
    }
}
