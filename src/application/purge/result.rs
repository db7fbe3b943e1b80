//! Purge session result

use crate::domain::ports::DeployWarning;

/// Outcome of one purge session
#[derive(Debug, Default)]
pub struct PurgeResult {
    /// Number of manifest rows processed
    pub removed: usize,
    /// Recovered per-item failures, in occurrence order
    pub warnings: Vec<DeployWarning>,
}

impl PurgeResult {
    /// Result of a no-op session (no destination configured)
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when nothing needed recovery
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}
