//! Error types for the deployment engine
//!
//! Session-level (structural) failures live here; per-file failures are
//! collected as [`DeployWarning`](crate::domain::ports::DeployWarning)
//! records instead of aborting the session.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::manifest_store::StoreError;

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

/// Structural errors that abort a deployment or purge session
#[derive(Error, Debug)]
pub enum EngineError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Destination directory exists but cannot be written to
    #[error("destination '{path}' is not writable: {message}")]
    DestinationUnwritable { path: PathBuf, message: String },

    /// Destination is already a deployment target of a different game
    #[error("destination '{path}' belongs to game '{owner}', refusing to deploy '{game}'")]
    ForeignDestination {
        path: PathBuf,
        owner: String,
        game: String,
    },

    /// Another session currently owns this destination
    #[error("a deployment session is already in progress for '{destination}'")]
    SessionInProgress { destination: PathBuf },

    /// Manifest persistence failed
    #[error("manifest store error: {0}")]
    Store(#[from] StoreError),
}
