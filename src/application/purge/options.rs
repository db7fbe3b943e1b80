//! Purge session options

use std::path::PathBuf;

use crate::domain::ports::ManifestKey;

/// Options for one purge session
#[derive(Debug, Clone)]
pub struct PurgeOptions {
    /// Game the session belongs to
    pub game_id: String,
    /// Root directory the mods are installed under
    pub installation_path: PathBuf,
    /// Live game directory to purge; `None` makes the whole session a
    /// benign no-op
    pub destination: Option<PathBuf>,
    /// Content category, namespaces the manifest
    pub type_id: Option<String>,
}

impl PurgeOptions {
    pub fn new(game_id: impl Into<String>, installation_path: impl Into<PathBuf>) -> Self {
        Self {
            game_id: game_id.into(),
            installation_path: installation_path.into(),
            destination: None,
            type_id: None,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = Some(destination.into());
        self
    }

    pub fn with_type(mut self, type_id: impl Into<String>) -> Self {
        self.type_id = Some(type_id.into());
        self
    }

    /// Manifest key for this session
    pub fn manifest_key(&self) -> ManifestKey {
        let key = ManifestKey::new(&self.game_id);
        match &self.type_id {
            Some(type_id) => key.with_type(type_id),
            None => key,
        }
    }
}
