//! Deployment session result

use crate::domain::entities::Manifest;
use crate::domain::ports::DeployWarning;

/// Outcome of one deployment session
///
/// Structural failures surface as errors; everything recovered per-file
/// ends up in `warnings` so the caller can show a summary.
#[derive(Debug, Default)]
pub struct DeployResult {
    /// The manifest that was persisted at session end
    pub manifest: Manifest,
    /// Recovered per-item failures, in occurrence order
    pub warnings: Vec<DeployWarning>,
}

impl DeployResult {
    /// Result of a no-op session (no destination configured)
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when nothing needed recovery
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
