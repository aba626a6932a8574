//! Directory tree walking
//!
//! This module builds the in-memory item tree that every report renders:
//!
//! - `glob` - wildcard matching for exclude patterns
//! - `item` - the item model and its arena
//! - `walker` - the recursive filesystem walk
//! - `progress` - progress callbacks fired during the walk

mod config;
mod glob;
mod item;
mod progress;
mod walker;

use std::path::Path;

use crate::error::WalkError;

pub use config::WalkerConfig;
pub use glob::{ExcludeSet, GlobPattern, matches};
pub use item::{Item, ItemId, ItemKind, ItemTree, Preorder};
pub use progress::{NoProgress, StatusLine, VerboseProgress, WalkProgress};
pub use walker::{TreeWalker, WalkCounts, WalkReport};

/// Walk `root` with comma-separated `excludes`, without progress reporting.
pub fn walk(root: &Path, excludes: &str, recursive: bool) -> Result<WalkReport, WalkError> {
    TreeWalker::new(WalkerConfig::new(recursive, excludes)).walk(root, &mut NoProgress)
}
