//! JSON output formatting

use serde::Serialize;

use crate::error::RenderError;
use crate::tree::{ItemId, ItemTree, WalkCounts};

/// Serializable view of one item and its subtree.
#[derive(Debug, Serialize)]
struct JsonItem<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    name: &'a str,
    path: String,
    size: u64,
    depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    extension: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    remark: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    children: Option<Vec<JsonItem<'a>>>,
}

impl<'a> JsonItem<'a> {
    fn build(tree: &'a ItemTree, id: ItemId) -> Self {
        let item = tree.get(id);
        item.mark_visited();
        let children = item.is_dir().then(|| {
            item.children()
                .iter()
                .map(|&child| JsonItem::build(tree, child))
                .collect()
        });
        Self {
            kind: item.kind().label(),
            name: item.name(),
            path: item.path().display().to_string(),
            size: item.size(),
            depth: item.depth(),
            extension: Some(item.extension()).filter(|e| !e.is_empty()),
            tag: item.tag().map(|t| t.name()),
            remark: item.remark(),
            children,
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    counts: WalkCounts,
    root: JsonItem<'a>,
}

/// Serialize the tree and its counts as pretty-printed JSON.
pub fn to_json(tree: &ItemTree, counts: &WalkCounts) -> Result<String, serde_json::Error> {
    let report = JsonReport {
        counts: *counts,
        root: JsonItem::build(tree, tree.root()),
    };
    serde_json::to_string_pretty(&report)
}

/// Print the tree as pretty-printed JSON to stdout.
pub fn print_json(tree: &ItemTree, counts: &WalkCounts) -> Result<(), RenderError> {
    let json = to_json(tree, counts)?;
    println!("{}", json);
    Ok(())
}
