//! Deployment session options

use std::path::PathBuf;

use crate::domain::ports::ManifestKey;

/// Default destination-relative location of merge-layer output
pub const DEFAULT_MERGED_REL_PATH: &str = "__merged";

/// Options for one deployment session
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Game the session belongs to
    pub game_id: String,
    /// Root directory the mods are installed under
    pub installation_path: PathBuf,
    /// Live game directory to deploy into; `None` makes the whole
    /// session a benign no-op
    pub destination: Option<PathBuf>,
    /// Content category, namespaces the manifest and the merge path
    pub type_id: Option<String>,
    /// Where the merge layer stages its output, relative to the
    /// installation root and to the destination
    pub merged_rel_path: String,
}

impl DeployOptions {
    pub fn new(game_id: impl Into<String>, installation_path: impl Into<PathBuf>) -> Self {
        Self {
            game_id: game_id.into(),
            installation_path: installation_path.into(),
            destination: None,
            type_id: None,
            merged_rel_path: DEFAULT_MERGED_REL_PATH.to_string(),
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

    pub fn with_merged_rel_path(mut self, rel_path: impl Into<String>) -> Self {
        self.merged_rel_path = rel_path.into();
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

    /// Source name of the merge-layer virtual mod
    /// (`<merged_rel_path>` or `<merged_rel_path>.<type_id>`)
    pub fn merged_source_name(&self) -> String {
        match &self.type_id {
            Some(type_id) => format!("{}.{}", self.merged_rel_path, type_id),
            None => self.merged_rel_path.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merged_source_name_gets_type_suffix() {
        let options = DeployOptions::new("skyrim", "/mods");
        assert_eq!(options.merged_source_name(), "__merged");

        let options = options.with_type("plugins");
        assert_eq!(options.merged_source_name(), "__merged.plugins");
    }

    #[test]
    fn manifest_key_matches_type() {
        let options = DeployOptions::new("skyrim", "/mods").with_type("plugins");
        assert_eq!(options.manifest_key().to_string(), "skyrim.plugins");
    }
}
