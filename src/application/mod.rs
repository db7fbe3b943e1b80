//! Application layer - session orchestration use cases

pub mod deploy;
pub mod purge;
pub mod session;

pub use deploy::{DeployOptions, DeployResult, DeployUseCase, DEFAULT_MERGED_REL_PATH};
pub use purge::{PurgeOptions, PurgeResult, PurgeUseCase};
pub use session::SessionLock;
