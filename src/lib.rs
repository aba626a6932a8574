//! dirprint - walk a directory tree and print it as an aligned listing or a styled spreadsheet

pub mod command;
pub mod error;
pub mod output;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use command::{Command, CommandRegistry, CommandTag, PrintArgs, PrintCommand};
pub use error::{DirprintError, RenderError, WalkError};
pub use output::{
    Field, FieldSet, GridDocument, OutputConfig, SheetWriter, TextFormatter, XlsxDocument,
    print_json, render_table, render_text,
};
pub use tree::{
    Item, ItemId, ItemKind, ItemTree, TreeWalker, WalkCounts, WalkReport, WalkerConfig, matches,
    walk,
};
