//! Domain ports - interfaces the engine depends on
//!
//! Infrastructure supplies the implementations (filesystem strategies,
//! JSON store); callers supply event sinks and the merge layer.

pub mod deploy_events;
pub mod deployment_method;
pub mod manifest_store;
pub mod merge_layer;

pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use deployment_method::{
    DeployWarning, DeploymentMethod, Finalized, MethodKind, ProgressFn, PurgeOutcome,
};
pub use manifest_store::{ManifestKey, ManifestStore, StoreError};
pub use merge_layer::{MergeLayer, NoMerge};
