//! Configuration types for the tree walker

use super::glob::ExcludeSet;

/// Configuration for tree walking behavior.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Descend into subdirectories. Off means only the root listing is captured.
    pub recursive: bool,
    /// Entries whose base name matches any of these are skipped entirely.
    pub excludes: ExcludeSet,
}

impl WalkerConfig {
    pub fn new(recursive: bool, excludes: &str) -> Self {
        Self {
            recursive,
            excludes: ExcludeSet::parse(excludes),
        }
    }
}
