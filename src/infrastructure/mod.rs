//! Infrastructure layer - filesystem strategies and persistence

pub mod fs;
pub mod methods;
pub mod store;

pub use methods::{create_method, FsDeploymentMethod};
pub use store::JsonManifestStore;
