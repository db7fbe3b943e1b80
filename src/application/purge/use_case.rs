//! Purge use case
//!
//! Reverses a previous deployment: every placement recorded in the
//! stored manifest is removed (or restored, for the move strategy) and
//! the manifest is reset to empty. The two must happen together; a
//! purge that clears the manifest but leaves files behind would orphan
//! them forever.

use tracing::info;

use crate::application::session::SessionLock;
use crate::domain::entities::Manifest;
use crate::domain::ports::{DeployEvent, DeployEventSink, DeploymentMethod, ManifestStore};
use crate::error::EngineResult;

use super::options::PurgeOptions;
use super::result::PurgeResult;

/// Purge use case, parameterized by the manifest store
pub struct PurgeUseCase<S: ManifestStore> {
    store: S,
}

impl<S: ManifestStore> PurgeUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Remove every deployed file for `options` and clear the manifest
    pub fn execute(
        &self,
        options: &PurgeOptions,
        method: &mut dyn DeploymentMethod,
        events: &dyn DeployEventSink,
    ) -> EngineResult<PurgeResult> {
        let destination = match &options.destination {
            Some(destination) => destination.clone(),
            None => return Ok(PurgeResult::empty()),
        };

        let _lock = SessionLock::acquire(&destination)?;

        let key = options.manifest_key();
        let manifest = self.store.load(&key)?;
        let removed = manifest.len();
        info!(game_id = %options.game_id, method = %method.kind(), files = removed, "purge started");

        let outcome = method.purge(&options.installation_path, &destination, &manifest)?;

        self.store.save(&key, &Manifest::new())?;

        events.on_event(DeployEvent::Purged {
            removed,
            warning_count: outcome.warnings.len(),
        });
        info!(
            removed,
            warnings = outcome.warnings.len(),
            "purge finished"
        );

        Ok(PurgeResult {
            removed,
            warnings: outcome.warnings,
        })
    }
}
