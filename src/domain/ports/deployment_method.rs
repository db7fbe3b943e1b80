//! DeploymentMethod port - the pluggable placement strategy
//!
//! A closed set of strategies (hardlink, symlink, copy, move) implement
//! this one capability interface. The active strategy is chosen once per
//! session by configuration and used for every file in that session.
//!
//! Call sequence for one session: `prepare` once, `activate` once per
//! mod in ascending priority order, `finalize` once. `purge` reverses a
//! previous session.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::entities::Manifest;
use crate::error::EngineResult;

/// Strategy descriptor, selected per game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Hardlink,
    Symlink,
    Copy,
    Move,
}

impl MethodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodKind::Hardlink => "hardlink",
            MethodKind::Symlink => "symlink",
            MethodKind::Copy => "copy",
            MethodKind::Move => "move",
        }
    }
}

impl fmt::Display for MethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recovered per-file failure
///
/// Per-item failures never abort the session; they are aggregated into
/// the session result so the caller can present a warning summary.
#[derive(Debug, Clone)]
pub struct DeployWarning {
    /// Id of the mod involved, when known
    pub mod_id: Option<String>,
    /// Path involved, when known
    pub path: Option<PathBuf>,
    /// What went wrong
    pub message: String,
}

impl DeployWarning {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            mod_id: None,
            path: None,
            message: message.into(),
        }
    }

    pub fn for_mod(mut self, mod_id: impl Into<String>) -> Self {
        self.mod_id = Some(mod_id.into());
        self
    }

    pub fn for_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl fmt::Display for DeployWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(id) = &self.mod_id {
            write!(f, "[{}] ", id)?;
        }
        if let Some(path) = &self.path {
            write!(f, "{}: ", path.display())?;
        }
        f.write_str(&self.message)
    }
}

/// Result of `finalize`: the reconciled manifest plus recovered failures
#[derive(Debug)]
pub struct Finalized {
    pub manifest: Manifest,
    pub warnings: Vec<DeployWarning>,
}

/// Result of `purge`: recovered failures only (the manifest is cleared)
#[derive(Debug, Default)]
pub struct PurgeOutcome {
    pub warnings: Vec<DeployWarning>,
}

/// Monotonic `(files_done, files_total)` progress callback
pub type ProgressFn<'a> = &'a mut dyn FnMut(usize, usize);

/// The deployment strategy contract
pub trait DeploymentMethod {
    /// Which strategy this is
    fn kind(&self) -> MethodKind;

    /// Ready the destination for a session
    ///
    /// Creates directories as needed. With `clean` set, `previous` is
    /// the baseline manifest to diff against. Fails when the destination
    /// is unwritable or is a deployment target of a different game.
    fn prepare(&mut self, destination: &Path, clean: bool, previous: &Manifest)
        -> EngineResult<()>;

    /// Deploy every file under `source` into the destination
    ///
    /// `source_name` is the mod id recorded in the manifest, `sub_dir`
    /// the destination subdirectory for this mod. Paths in `merged` are
    /// claimed by the merge layer and skipped unless the method is
    /// configured to override them. A missing or empty `source` is a
    /// no-op. Per-file failures are recorded and skipped.
    fn activate(
        &mut self,
        source: &Path,
        source_name: &str,
        sub_dir: &Path,
        merged: &BTreeSet<String>,
    ) -> EngineResult<()>;

    /// Reconcile and close the session
    ///
    /// Removes placements whose path is no longer contributed by any
    /// active mod or the merge layer, tags the destination with
    /// `game_id`, and returns the new manifest with aggregated warnings.
    fn finalize(
        &mut self,
        game_id: &str,
        destination: &Path,
        installation_path: &Path,
        progress: Option<ProgressFn<'_>>,
    ) -> EngineResult<Finalized>;

    /// Remove every placement recorded in `manifest`
    ///
    /// Strategy-specific: links and copies are deleted, moved files are
    /// restored to their source. Files already removed externally are
    /// tolerated. Purging an empty manifest is a no-op.
    fn purge(
        &mut self,
        installation_path: &Path,
        destination: &Path,
        manifest: &Manifest,
    ) -> EngineResult<PurgeOutcome>;
}
