//! Manifest entity - the durable record of deployed files
//!
//! One manifest exists per `(game_id, type_id)` pair. It is a pure data
//! structure; persistence is handled by a `ManifestStore` implementation.
//!
//! The manifest is the single source of truth for "who currently owns
//! this destination path". Filesystem mismatches are repair signals:
//! rows whose backing file is gone get dropped on the next finalize,
//! files on disk without a row are foreign and never touched.

use std::collections::HashMap;
use std::path::Path;

/// Normalize a destination-relative path for manifest storage
/// (always forward slashes).
pub fn normalize_rel_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// One deployed file: which destination path was placed from which
/// mod-relative source, and the destination mtime (epoch ms) at placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployedFile {
    rel_path: String,
    source: String,
    source_path: String,
    time: u64,
}

impl DeployedFile {
    pub fn new(
        rel_path: impl Into<String>,
        source: impl Into<String>,
        source_path: impl Into<String>,
        time: u64,
    ) -> Self {
        Self {
            rel_path: rel_path.into(),
            source: source.into(),
            source_path: source_path.into(),
            time,
        }
    }

    /// Destination-relative path (forward slashes)
    pub fn rel_path(&self) -> &str {
        &self.rel_path
    }

    /// Id of the mod that placed this file
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Path of the file inside its mod, relative to the mod root
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Destination mtime in epoch milliseconds at placement time
    pub fn time(&self) -> u64 {
        self.time
    }
}

/// Insertion-ordered set of [`DeployedFile`] with unique `rel_path` keys
///
/// Recording a path that is already present overwrites the existing row
/// in place - last-writer-wins, never a duplicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    entries: Vec<DeployedFile>,
    index: HashMap<String, usize>,
}

impl Manifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record a placement. Returns the replaced row, if any.
    pub fn record(&mut self, file: DeployedFile) -> Option<DeployedFile> {
        match self.index.get(&file.rel_path) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos], file)),
            None => {
                self.index.insert(file.rel_path.clone(), self.entries.len());
                self.entries.push(file);
                None
            }
        }
    }

    pub fn get(&self, rel_path: &str) -> Option<&DeployedFile> {
        self.index.get(rel_path).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.index.contains_key(rel_path)
    }

    /// Rows in insertion order
    pub fn files(&self) -> impl Iterator<Item = &DeployedFile> {
        self.entries.iter()
    }
}
