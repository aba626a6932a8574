//! Item model and the arena that owns the walked tree
//!
//! Items live in a flat `Vec<Item>` owned by [`ItemTree`]. Children and the
//! parent back-reference are [`ItemId`] indices, so ownership is strictly
//! top-down through the arena and the parent link never owns anything.

use std::cell::Cell;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::command::CommandTag;

/// Index of an item inside its [`ItemTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u32);

impl ItemId {
    #[inline]
    fn new(index: usize) -> Self {
        debug_assert!(index <= u32::MAX as usize, "ItemId overflow");
        Self(index as u32)
    }

    #[inline]
    pub fn idx(self) -> usize {
        self.0 as usize
    }
}

/// What kind of filesystem entry an item stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Unknown,
    File,
    Directory,
    Link,
}

impl ItemKind {
    pub fn label(self) -> &'static str {
        match self {
            ItemKind::Unknown => "Unknown",
            ItemKind::File => "File",
            ItemKind::Directory => "Directory",
            ItemKind::Link => "Link",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One file, directory or link in the walked tree.
#[derive(Debug, Clone)]
pub struct Item {
    kind: ItemKind,
    name: String,
    /// Directory containing this item, without the item's own name.
    path: PathBuf,
    /// File length, or the sum of all descendant sizes for a directory.
    size: u64,
    /// Distance to the deepest descendant leaf. Leaves are 0.
    depth: usize,
    children: Vec<ItemId>,
    parent: Option<ItemId>,
    tag: Option<CommandTag>,
    status: Cell<bool>,
    remark: Option<String>,
}

impl Item {
    pub fn new(kind: ItemKind, path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            path: path.into(),
            size: 0,
            depth: 0,
            children: Vec::new(),
            parent: None,
            tag: None,
            status: Cell::new(false),
            remark: None,
        }
    }

    /// Build the root directory item for an absolute directory path.
    ///
    /// A filesystem root has no final component, so its whole path becomes
    /// the name and `path` stays empty.
    pub fn root(dir: &Path) -> Self {
        match (dir.parent(), dir.file_name()) {
            (Some(parent), Some(name)) => {
                Self::new(ItemKind::Directory, parent, name.to_string_lossy())
            }
            _ => Self::new(ItemKind::Directory, PathBuf::new(), dir.to_string_lossy()),
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_tag(mut self, tag: Option<CommandTag>) -> Self {
        self.tag = tag;
        self
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == ItemKind::Directory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn full_path(&self) -> PathBuf {
        self.path.join(&self.name)
    }

    /// Text after the last dot of a file name. Empty for non-files.
    pub fn extension(&self) -> &str {
        if self.kind != ItemKind::File {
            return "";
        }
        match self.name.rfind('.') {
            Some(pos) => &self.name[pos + 1..],
            None => "",
        }
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub fn parent(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn tag(&self) -> Option<CommandTag> {
        self.tag
    }

    /// Whether a report has already emitted this item.
    pub fn status(&self) -> bool {
        self.status.get()
    }

    pub fn mark_visited(&self) {
        self.status.set(true);
    }

    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }
}

/// Arena holding every item of one walk.
#[derive(Debug, Clone)]
pub struct ItemTree {
    items: Vec<Item>,
    root: ItemId,
}

impl ItemTree {
    /// Start a tree from its root item.
    pub fn new(root: Item) -> Self {
        Self {
            items: vec![root],
            root: ItemId::new(0),
        }
    }

    pub fn root(&self) -> ItemId {
        self.root
    }

    pub fn get(&self, id: ItemId) -> &Item {
        &self.items[id.idx()]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocate `item` under `parent` without listing it as a child yet.
    ///
    /// The walker fills in a directory's own subtree between `insert` and
    /// [`ItemTree::attach`], so the parent only ever sees finished children.
    pub fn insert(&mut self, parent: ItemId, mut item: Item) -> ItemId {
        item.parent = Some(parent);
        let id = ItemId::new(self.items.len());
        self.items.push(item);
        id
    }

    /// Append `child` to `parent` and fold its depth and size into the parent.
    pub fn attach(&mut self, parent: ItemId, child: ItemId) {
        let (child_depth, child_size) = {
            let c = &self.items[child.idx()];
            debug_assert_eq!(c.parent, Some(parent));
            (c.depth, c.size)
        };
        let p = &mut self.items[parent.idx()];
        p.children.push(child);
        p.depth = p.depth.max(child_depth + 1);
        p.size += child_size;
    }

    /// Insert and attach in one step, for items with no subtree.
    pub fn push_child(&mut self, parent: ItemId, item: Item) -> ItemId {
        let id = self.insert(parent, item);
        self.attach(parent, id);
        id
    }

    pub fn set_remark(&mut self, id: ItemId, remark: impl Into<String>) {
        self.items[id.idx()].remark = Some(remark.into());
    }

    /// Depth-first ids: a directory before its children, children in order.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: vec![self.root],
        }
    }
}

/// Iterator returned by [`ItemTree::preorder`].
pub struct Preorder<'a> {
    tree: &'a ItemTree,
    stack: Vec<ItemId>,
}

impl Iterator for Preorder<'_> {
    type Item = ItemId;

    fn next(&mut self) -> Option<ItemId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.get(id).children.iter().rev().copied());
        Some(id)
    }
}
