//! Output configuration types

use std::collections::BTreeSet;
use std::io::IsTerminal;

use clap::ValueEnum;

use crate::tree::Item;

/// A per-item column a report can show.
///
/// Declaration order is the fixed column order of every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Path,
    FullPath,
    Type,
    Size,
    Extension,
    Command,
    Result,
    Remark,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Path,
        Field::FullPath,
        Field::Type,
        Field::Size,
        Field::Extension,
        Field::Command,
        Field::Result,
        Field::Remark,
    ];

    /// Column heading.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Path => "Path",
            Field::FullPath => "Full path",
            Field::Type => "Type",
            Field::Size => "Size",
            Field::Extension => "Extension",
            Field::Command => "Command",
            Field::Result => "Result",
            Field::Remark => "Remark",
        }
    }

    /// Whether the console listing can show this field.
    pub fn in_text_report(self) -> bool {
        self <= Field::Extension
    }

    /// Render this field of `item` as text.
    pub fn value(self, item: &Item) -> String {
        match self {
            Field::Name => item.name().to_string(),
            Field::Path => item.path().display().to_string(),
            Field::FullPath => item.full_path().display().to_string(),
            Field::Type => item.kind().label().to_string(),
            Field::Size => item.size().to_string(),
            Field::Extension => item.extension().to_string(),
            Field::Command => item.tag().map(|t| t.name().to_string()).unwrap_or_default(),
            Field::Result => {
                let result = if item.remark().is_some() { "Failed" } else { "OK" };
                result.to_string()
            }
            Field::Remark => item.remark().unwrap_or_default().to_string(),
        }
    }
}

/// The set of selected fields, always iterated in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(BTreeSet<Field>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Field::ALL.into_iter().collect()
    }

    pub fn with(mut self, field: Field) -> Self {
        self.0.insert(field);
        self
    }

    /// Include `field` when `on` is set, drop it otherwise.
    pub fn toggle(&mut self, field: Field, on: bool) {
        if on {
            self.0.insert(field);
        } else {
            self.0.remove(&field);
        }
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Field> + '_ {
        self.0.iter().copied()
    }

    /// Selected fields the console listing can show.
    pub fn text_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.iter().filter(|f| f.in_text_report())
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Color output mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect based on terminal and environment
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Determine whether to use color output based on mode and environment.
pub fn should_use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            // https://no-color.org/
            if std::env::var_os("NO_COLOR").is_some() {
                return false;
            }
            if std::env::var_os("FORCE_COLOR").is_some() {
                return true;
            }
            if std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false) {
                return false;
            }
            std::io::stdout().is_terminal()
        }
    }
}

/// Configuration for report output.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    pub fields: FieldSet,
    /// Repeat names in the leading and connector cells of the table report.
    pub log_parent_name: bool,
    pub use_color: bool,
}
