//! Mod reference entity
//!
//! Identifies one content unit managed by the installation subsystem.
//! The engine only ever reads a slice of these, already sorted from
//! lowest to highest priority.

use std::path::{Path, PathBuf};

/// A reference to an installed mod
///
/// Immutable for the duration of a deployment pass. `installation_path`
/// is relative to the installation root supplied alongside the mod list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModRef {
    id: String,
    installation_path: PathBuf,
    name: Option<String>,
}

impl ModRef {
    pub fn new(id: impl Into<String>, installation_path: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            installation_path: installation_path.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn installation_path(&self) -> &Path {
        &self.installation_path
    }

    /// Display name, falling back to the id
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
