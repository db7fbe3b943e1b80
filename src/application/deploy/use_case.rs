//! Deploy use case
//!
//! Drives one full deployment pass:
//! 1. Resolve the merged-path set from the merge layer
//! 2. Prepare the destination against the previous manifest
//! 3. Activate every mod in ascending priority order (first half of the
//!    progress range; per-mod failures become warnings, not aborts)
//! 4. Activate the merge-layer virtual mod last
//! 5. Finalize (second half of the progress range) and persist the
//!    manifest atomically
//!
//! The use case is pure orchestration; placement lives in the method,
//! persistence in the store.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::application::session::SessionLock;
use crate::domain::entities::{normalize_rel_path, ModRef};
use crate::domain::ports::{
    DeployEvent, DeployEventSink, DeployWarning, DeploymentMethod, ManifestStore, MergeLayer,
};
use crate::error::EngineResult;

use super::options::DeployOptions;
use super::result::DeployResult;

/// Deploy use case, parameterized by the manifest store
pub struct DeployUseCase<S: ManifestStore> {
    store: S,
}

impl<S: ManifestStore> DeployUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run one deployment pass
    ///
    /// `mods` is already ordered low to high priority. `sub_dir` maps
    /// each mod to its destination subdirectory (empty for games that
    /// deploy flat).
    pub fn execute(
        &self,
        options: &DeployOptions,
        mods: &[ModRef],
        method: &mut dyn DeploymentMethod,
        merge: &dyn MergeLayer,
        sub_dir: &dyn Fn(&ModRef) -> PathBuf,
        events: &dyn DeployEventSink,
    ) -> EngineResult<DeployResult> {
        // A game without a configured destination is a no-op, not an error.
        let destination = match &options.destination {
            Some(destination) => destination.clone(),
            None => return Ok(DeployResult::empty()),
        };

        let _lock = SessionLock::acquire(&destination)?;

        events.on_event(DeployEvent::Started {
            game_id: options.game_id.clone(),
            destination: destination.clone(),
            mod_count: mods.len(),
        });
        info!(game_id = %options.game_id, method = %method.kind(), mods = mods.len(), "deployment started");

        let key = options.manifest_key();
        let previous = self.store.load(&key)?;

        method.prepare(&destination, true, &previous)?;

        // The merge layer declares its output before any mod is placed so
        // no activation can clobber it.
        let merged = merge.declared_paths(options.type_id.as_deref());

        let mut warnings = Vec::new();
        let total = mods.len();
        for (idx, mod_ref) in mods.iter().enumerate() {
            let percent = ((idx * 50) as f64 / total as f64).round() as u8;
            events.on_event(DeployEvent::Progress {
                label: mod_ref.name().to_string(),
                percent,
            });

            let source = options.installation_path.join(mod_ref.installation_path());
            let source_name = normalize_rel_path(mod_ref.installation_path());
            match method.activate(&source, &source_name, &sub_dir(mod_ref), &merged) {
                Ok(()) => events.on_event(DeployEvent::ModActivated {
                    index: idx,
                    mod_id: mod_ref.id().to_string(),
                }),
                Err(err) => {
                    // One bad mod must not abort deployment of the rest.
                    error!(mod_id = mod_ref.id(), error = %err, "failed to deploy mod");
                    warnings.push(
                        DeployWarning::new(format!("failed to deploy mod: {}", err))
                            .for_mod(mod_ref.id()),
                    );
                    events.on_event(DeployEvent::ModFailed {
                        index: idx,
                        mod_id: mod_ref.id().to_string(),
                        error: err.to_string(),
                    });
                }
            }
        }

        // Merge output deploys after every real mod, with an empty merged
        // set of its own - it never defers to itself.
        let merged_name = options.merged_source_name();
        let merged_source = options.installation_path.join(&merged_name);
        if let Err(err) = method.activate(&merged_source, &merged_name, Path::new(""), &BTreeSet::new())
        {
            error!(source = %merged_name, error = %err, "failed to deploy merge output");
            warnings.push(
                DeployWarning::new(format!("failed to deploy merge output: {}", err))
                    .for_mod(&merged_name),
            );
        }

        let mut progress = |done: usize, files_total: usize| {
            let percent = if files_total == 0 {
                100
            } else {
                (50 + done * 50 / files_total) as u8
            };
            events.on_event(DeployEvent::Progress {
                label: format!("{}/{} files", done, files_total),
                percent,
            });
        };
        let finalized = method.finalize(
            &options.game_id,
            &destination,
            &options.installation_path,
            Some(&mut progress),
        )?;
        warnings.extend(finalized.warnings);

        self.store.save(&key, &finalized.manifest)?;

        events.on_event(DeployEvent::Completed {
            deployed: finalized.manifest.len(),
            warning_count: warnings.len(),
        });
        info!(
            deployed = finalized.manifest.len(),
            warnings = warnings.len(),
            "deployment finished"
        );

        Ok(DeployResult {
            manifest: finalized.manifest,
            warnings,
        })
    }
}
