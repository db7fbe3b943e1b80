//! Manifest persistence implementations

mod json_manifest;

pub use json_manifest::JsonManifestStore;
