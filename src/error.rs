//! Error types for walking and rendering

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error returned by commands.
#[derive(Debug, Error)]
pub enum DirprintError {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Problems met while building the item tree.
///
/// Only a failure on the walk root aborts the walk. Everything below the root
/// is collected into [`crate::tree::WalkReport::errors`] and the walk goes on.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("{} is not a directory", path.display())]
    RootNotDirectory { path: PathBuf },

    #[error("cannot list directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read an entry of {}: {source}", path.display())]
    ReadEntry {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read metadata of {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures while writing a report.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("write failed: {0}")]
    Io(#[from] io::Error),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("column {column} is beyond the last spreadsheet column")]
    ColumnOutOfRange { column: usize },
}
