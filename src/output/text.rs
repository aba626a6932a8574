//! Aligned console listing
//!
//! Rendering runs in two passes over the same pre-order walk of the tree.
//! The measure pass records the widest value of every column, and the print
//! pass pads each column to that width plus [`SEPARATOR`]. The widths are only
//! known once the whole tree has been seen, so the passes cannot be merged.
//!
//! The first column is the item name indented by `(root depth - item depth)`
//! units. Depth counts down towards the leaves, so items nearer the deepest
//! leaf of the root are indented further.

use std::collections::BTreeMap;
use std::io;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::tree::{ItemId, ItemTree, WalkCounts};

use super::config::{Field, FieldSet, OutputConfig};

/// Gap after every column, also used as the indent unit.
pub const SEPARATOR: &str = "    ";

/// Widest value per column, filled by the measure pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnWidths {
    /// The synthetic indent + name column.
    pub indented_name: usize,
    pub fields: BTreeMap<Field, usize>,
}

impl ColumnWidths {
    /// Measure every column over the whole tree.
    pub fn measure(tree: &ItemTree, fields: &FieldSet) -> Self {
        let root_depth = tree.get(tree.root()).depth();
        let mut widths = ColumnWidths::default();
        for field in fields.text_fields() {
            widths.fields.insert(field, 0);
        }

        for id in tree.preorder() {
            let item = tree.get(id);
            let indented = indent_width(root_depth, item.depth()) + item.name().chars().count();
            widths.indented_name = widths.indented_name.max(indented);
            for (field, width) in widths.fields.iter_mut() {
                *width = (*width).max(field.value(item).chars().count());
            }
        }
        widths
    }

    pub fn field(&self, field: Field) -> Option<usize> {
        self.fields.get(&field).copied()
    }
}

fn indent_width(root_depth: usize, depth: usize) -> usize {
    root_depth.saturating_sub(depth) * SEPARATOR.len()
}

fn pad(out: &mut String, text: &str, width: usize) {
    out.push_str(text);
    let used = text.chars().count();
    for _ in used..width + SEPARATOR.len() {
        out.push(' ');
    }
}

/// Render one line per item, directory lines before their descendants.
pub fn render_text(tree: &ItemTree, fields: &FieldSet) -> Vec<String> {
    render_rows(tree, fields)
        .into_iter()
        .map(|(_, line)| line)
        .collect()
}

fn render_rows(tree: &ItemTree, fields: &FieldSet) -> Vec<(ItemId, String)> {
    let widths = ColumnWidths::measure(tree, fields);
    let root_depth = tree.get(tree.root()).depth();

    tree.preorder()
        .map(|id| {
            let item = tree.get(id);
            let indented = format!(
                "{}{}",
                " ".repeat(indent_width(root_depth, item.depth())),
                item.name()
            );
            let mut line = String::new();
            pad(&mut line, &indented, widths.indented_name);
            for (&field, &width) in &widths.fields {
                pad(&mut line, &field.value(item), width);
            }
            item.mark_visited();
            (id, line)
        })
        .collect()
}

/// Prints the listing to stdout, directories highlighted when color is on.
pub struct TextFormatter {
    config: OutputConfig,
}

impl TextFormatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Format the listing and the closing summary into a string.
    pub fn format(&self, tree: &ItemTree, counts: &WalkCounts) -> String {
        let mut output = String::new();
        for line in render_text(tree, &self.config.fields) {
            output.push_str(&line);
            output.push('\n');
        }
        output.push_str(&format!("\n{}\n", counts));
        output
    }

    pub fn print(&self, tree: &ItemTree, counts: &WalkCounts) -> io::Result<()> {
        let mut stdout = StandardStream::stdout(self.color_choice());
        self.write_to(&mut stdout, tree, counts)
    }

    /// `use_color` is final here; termcolor gets no say.
    fn color_choice(&self) -> ColorChoice {
        if self.config.use_color {
            ColorChoice::Always
        } else {
            ColorChoice::Never
        }
    }

    pub fn write_to<W: WriteColor>(
        &self,
        out: &mut W,
        tree: &ItemTree,
        counts: &WalkCounts,
    ) -> io::Result<()> {
        for (id, line) in render_rows(tree, &self.config.fields) {
            if tree.get(id).is_dir() {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                write!(out, "{}", line)?;
                out.reset()?;
                writeln!(out)?;
            } else {
                writeln!(out, "{}", line)?;
            }
        }
        writeln!(out)?;
        writeln!(out, "{}", counts)?;
        Ok(())
    }
}
