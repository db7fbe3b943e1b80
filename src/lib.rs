//! Modlink - mod deployment engine
//!
//! Modlink links the contents of installed game mods into a live game
//! directory and keeps a durable manifest of everything it placed, so a
//! deployment can always be reconciled or fully reversed. Placement is
//! strategy-based (hardlink, symlink, copy, move); mods deploy in
//! ascending priority order and the last writer owns each path.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    DeployOptions, DeployResult, DeployUseCase, PurgeOptions, PurgeResult, PurgeUseCase,
    SessionLock, DEFAULT_MERGED_REL_PATH,
};
pub use domain::entities::{normalize_rel_path, DeployedFile, Manifest, ModRef};
pub use domain::ports::{
    DeployEvent, DeployEventSink, DeployWarning, DeploymentMethod, Finalized, ManifestKey,
    ManifestStore, MergeLayer, MethodKind, NoMerge, NoopEventSink, PurgeOutcome, StoreError,
};
pub use error::{EngineError, EngineResult};
pub use infrastructure::{create_method, FsDeploymentMethod, JsonManifestStore};
