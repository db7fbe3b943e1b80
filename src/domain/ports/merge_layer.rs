//! MergeLayer port - interface to the build-time file merger
//!
//! The merge layer combines overlapping files from many mods into one
//! synthetic tree per content type. The engine's only contract with it:
//! the set of destination-relative paths it will produce must be known
//! before per-mod activation, so those paths are never clobbered, and
//! its output tree is deployed last as one more (virtual) mod.

use std::collections::BTreeSet;

/// Declares merge output ahead of a deployment session
pub trait MergeLayer {
    /// Destination-relative paths the merge step will produce for
    /// `type_id` (forward-slash normalized)
    fn declared_paths(&self, type_id: Option<&str>) -> BTreeSet<String>;
}

/// Merge layer that declares nothing - for games without file merging
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMerge;

impl MergeLayer for NoMerge {
    fn declared_paths(&self, _type_id: Option<&str>) -> BTreeSet<String> {
        BTreeSet::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_merge_declares_nothing() {
        assert!(NoMerge.declared_paths(None).is_empty());
        assert!(NoMerge.declared_paths(Some("plugins")).is_empty());
    }
}
