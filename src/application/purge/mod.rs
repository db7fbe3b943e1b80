//! Purge session orchestration

mod options;
mod result;
mod use_case;

pub use options::PurgeOptions;
pub use result::PurgeResult;
pub use use_case::PurgeUseCase;
