//! JSON manifest store
//!
//! One JSON document per `(game_id, type_id)` key under a state
//! directory. Saves are write-new-then-replace, so a crash mid-save
//! leaves the previous manifest intact.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{DeployedFile, Manifest};
use crate::domain::ports::{ManifestKey, ManifestStore, StoreError};
use crate::infrastructure::fs::atomic_write;

const FORMAT_VERSION: u32 = 1;

/// JSON representation of one manifest row
#[derive(Debug, Serialize, Deserialize)]
struct JsonRow {
    #[serde(rename = "relPath")]
    rel_path: String,
    source: String,
    #[serde(rename = "sourcePath")]
    source_path: String,
    time: u64,
}

/// JSON representation of the whole manifest
#[derive(Debug, Serialize, Deserialize)]
struct JsonManifest {
    version: u32,
    #[serde(default)]
    files: Vec<JsonRow>,
}

/// Filesystem-backed [`ManifestStore`]
pub struct JsonManifestStore {
    root: PathBuf,
}

impl JsonManifestStore {
    /// Store manifests under `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store manifests under the platform state directory
    /// (`~/.local/share/modlink` or equivalent)
    pub fn in_default_location() -> Self {
        let root = dirs::data_dir()
            .map(|d| d.join("modlink"))
            .unwrap_or_else(|| PathBuf::from(".modlink"));
        Self::new(root)
    }

    fn path_for(&self, key: &ManifestKey) -> PathBuf {
        self.root.join(format!("{}.deployment.json", key))
    }
}

impl ManifestStore for JsonManifestStore {
    fn load(&self, key: &ManifestKey) -> Result<Manifest, StoreError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(Manifest::new());
        }

        let raw = std::fs::read(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        let parsed: JsonManifest =
            serde_json::from_slice(&raw).map_err(|e| StoreError::Corrupt(e.to_string()))?;

        if parsed.version != FORMAT_VERSION {
            return Err(StoreError::VersionMismatch {
                found: parsed.version,
                expected: FORMAT_VERSION,
            });
        }

        let mut manifest = Manifest::new();
        for row in parsed.files {
            manifest.record(DeployedFile::new(
                row.rel_path,
                row.source,
                row.source_path,
                row.time,
            ));
        }
        Ok(manifest)
    }

    fn save(&self, key: &ManifestKey, manifest: &Manifest) -> Result<(), StoreError> {
        let doc = JsonManifest {
            version: FORMAT_VERSION,
            files: manifest
                .files()
                .map(|f| JsonRow {
                    rel_path: f.rel_path().to_string(),
                    source: f.source().to_string(),
                    source_path: f.source_path().to_string(),
                    time: f.time(),
                })
                .collect(),
        };

        let raw = serde_json::to_vec_pretty(&doc).map_err(|e| StoreError::Io(e.to_string()))?;
        atomic_write(&self.path_for(key), &raw).map_err(|e| StoreError::Io(e.to_string()))
    }
}
