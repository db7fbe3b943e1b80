//! Domain entities - pure data structures with no I/O

pub mod manifest;
pub mod mod_ref;

pub use manifest::{normalize_rel_path, DeployedFile, Manifest};
pub use mod_ref::ModRef;
