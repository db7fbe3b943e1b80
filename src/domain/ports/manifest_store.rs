//! ManifestStore port - durable manifest persistence
//!
//! The engine reads the previous manifest at session start and writes
//! the new one at session end, keyed by `(game_id, type_id)`. Only the
//! logical schema is fixed; the byte layout belongs to the
//! implementation.

use std::fmt;

use thiserror::Error;

use crate::domain::entities::Manifest;

/// Errors from manifest persistence
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to access manifest: {0}")]
    Io(String),

    #[error("manifest is corrupt: {0}")]
    Corrupt(String),

    #[error("manifest format version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}

/// Identifies one persisted manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestKey {
    game_id: String,
    type_id: Option<String>,
}

impl ManifestKey {
    pub fn new(game_id: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            type_id: None,
        }
    }

    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn type_id(&self) -> Option<&str> {
        self.type_id.as_deref()
    }
}

impl fmt::Display for ManifestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.type_id {
            Some(type_id) => write!(f, "{}.{}", self.game_id, type_id),
            None => f.write_str(&self.game_id),
        }
    }
}

/// Keyed durable manifest store
pub trait ManifestStore {
    /// Load the manifest for `key`, or an empty one if none was saved yet
    fn load(&self, key: &ManifestKey) -> Result<Manifest, StoreError>;

    /// Persist `manifest` under `key` atomically (write-new-then-replace)
    fn save(&self, key: &ManifestKey, manifest: &Manifest) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_display_includes_type_suffix() {
        let key = ManifestKey::new("skyrim");
        assert_eq!(key.to_string(), "skyrim");

        let key = key.with_type("collections");
        assert_eq!(key.to_string(), "skyrim.collections");
    }
}
