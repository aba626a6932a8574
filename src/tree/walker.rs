//! TreeWalker - builds the item tree for one directory
//!
//! The walk is depth-first and single-threaded. Each directory is listed,
//! filtered through the exclude patterns and sorted by name; every surviving
//! entry is classified, inserted, descended into when it is a directory and
//! the walk is recursive, counted, and finally attached to its parent so that
//! the parent's depth and size absorb the finished subtree.
//!
//! Recursion follows the filesystem depth, so a pathologically deep tree
//! grows the native stack accordingly.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::command::CommandTag;
use crate::error::WalkError;

use super::config::WalkerConfig;
use super::item::{Item, ItemId, ItemKind, ItemTree};
use super::progress::WalkProgress;

/// Running totals for one walk. Excluded entries are never counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WalkCounts {
    pub directories: usize,
    pub files: usize,
    pub links: usize,
}

impl WalkCounts {
    fn record(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::Directory => self.directories += 1,
            ItemKind::File => self.files += 1,
            ItemKind::Link => self.links += 1,
            ItemKind::Unknown => {}
        }
    }

    pub fn total(&self) -> usize {
        self.directories + self.files + self.links
    }
}

impl fmt::Display for WalkCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} directories, {} files, {} links",
            self.directories, self.files, self.links
        )
    }
}

/// Everything a finished walk produced.
#[derive(Debug)]
pub struct WalkReport {
    pub tree: ItemTree,
    pub counts: WalkCounts,
    /// Subtrees and entries that could not be read. The walk went on without them.
    pub errors: Vec<WalkError>,
}

/// Tree walker that builds the full tree in memory.
pub struct TreeWalker {
    config: WalkerConfig,
    tag: Option<CommandTag>,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config, tag: None }
    }

    /// Stamp every produced item with the command that asked for the walk.
    pub fn with_tag(mut self, tag: CommandTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Walk `root`, which must be an existing directory.
    ///
    /// Only a failure to list `root` itself is returned as an error.
    pub fn walk(
        &self,
        root: &Path,
        progress: &mut dyn WalkProgress,
    ) -> Result<WalkReport, WalkError> {
        if !root.is_dir() {
            return Err(WalkError::RootNotDirectory {
                path: root.to_path_buf(),
            });
        }

        let tree = ItemTree::new(Item::root(root).with_tag(self.tag));
        let mut session = WalkSession {
            config: &self.config,
            tag: self.tag,
            tree,
            counts: WalkCounts::default(),
            errors: Vec::new(),
            progress,
        };
        let root_id = session.tree.root();
        session.walk_dir(root_id, root)?;
        session.progress.finish(&session.counts);

        Ok(WalkReport {
            tree: session.tree,
            counts: session.counts,
            errors: session.errors,
        })
    }
}

/// State shared by every level of one walk.
struct WalkSession<'a> {
    config: &'a WalkerConfig,
    tag: Option<CommandTag>,
    tree: ItemTree,
    counts: WalkCounts,
    errors: Vec<WalkError>,
    progress: &'a mut dyn WalkProgress,
}

impl WalkSession<'_> {
    fn walk_dir(&mut self, dir: ItemId, dir_path: &Path) -> Result<(), WalkError> {
        let entries = fs::read_dir(dir_path).map_err(|source| WalkError::ReadDir {
            path: dir_path.to_path_buf(),
            source,
        })?;

        let mut entries: Vec<fs::DirEntry> = entries
            .filter_map(|entry| match entry {
                Ok(e) => Some(e),
                Err(source) => {
                    self.record(
                        dir,
                        WalkError::ReadEntry {
                            path: dir_path.to_path_buf(),
                            source,
                        },
                    );
                    None
                }
            })
            .collect();
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name().to_string_lossy().into_owned();
            if let Some(pattern) = self.config.excludes.matching(&name) {
                debug!("excluded {} (pattern {:?})", name, pattern.as_str());
                continue;
            }

            let entry_path = entry.path();
            let kind = classify(&entry_path);
            let mut item = Item::new(kind, dir_path, name).with_tag(self.tag);
            let mut remark = None;
            if kind == ItemKind::File {
                match entry_path.metadata() {
                    Ok(meta) => item = item.with_size(meta.len()),
                    Err(source) => {
                        remark = Some(WalkError::Metadata {
                            path: entry_path.clone(),
                            source,
                        })
                    }
                }
            }

            let id = self.tree.insert(dir, item);
            if let Some(err) = remark {
                self.record(id, err);
            }

            if kind == ItemKind::Directory && self.config.recursive {
                if entry_path.is_symlink() {
                    debug!("not following directory link {}", entry_path.display());
                } else {
                    self.descend(id, &entry_path);
                }
            }

            self.counts.record(kind);
            self.tree.attach(dir, id);
            self.progress.on_item(self.tree.get(id), &self.counts);
        }

        Ok(())
    }

    /// List `path` into `id`. Failing to list it leaves `id` empty with a remark.
    fn descend(&mut self, id: ItemId, path: &Path) {
        if let Err(err) = self.walk_dir(id, path) {
            self.record(id, err);
        }
    }

    /// Keep a non-fatal error and note it on the affected item.
    fn record(&mut self, id: ItemId, err: WalkError) {
        warn!("{}", err);
        self.tree.set_remark(id, err.to_string());
        self.errors.push(err);
    }
}

/// Classify an entry. The directory check follows links and runs first, so a
/// link to a directory is reported as a directory.
fn classify(path: &Path) -> ItemKind {
    let meta = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(_) => return ItemKind::Unknown,
    };
    if path.is_dir() {
        ItemKind::Directory
    } else if meta.file_type().is_symlink() {
        ItemKind::Link
    } else {
        ItemKind::File
    }
}
