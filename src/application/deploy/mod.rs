//! Deployment session orchestration

mod options;
mod result;
mod use_case;

pub use options::{DeployOptions, DEFAULT_MERGED_REL_PATH};
pub use result::DeployResult;
pub use use_case::DeployUseCase;
