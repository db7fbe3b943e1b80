//! Deployment method implementations
//!
//! The four strategies (hardlink, symlink, copy, move) are a closed set:
//! each supplies a [`Placement`] describing how one file gets into the
//! destination and how it comes back out, and the shared
//! [`FsDeploymentMethod`] session engine drives the contract on top of
//! it. No strategy shares mutable state with another.

use std::io;
use std::path::Path;

use crate::domain::ports::{DeploymentMethod, MethodKind};

mod copy;
mod fs_method;
mod hardlink;
mod moving;
mod symlink;

pub use copy::CopyPlacement;
pub use fs_method::FsDeploymentMethod;
pub use hardlink::HardlinkPlacement;
pub use moving::MovePlacement;
pub use symlink::SymlinkPlacement;

/// Name of the ownership tag file written into the destination root
pub const TAG_FILE: &str = ".modlink.tag.json";

/// How one file is placed into and removed from the destination
pub trait Placement: Send + Sync {
    fn kind(&self) -> MethodKind;

    /// Put `source` at `dest`. `dest`'s parent exists and `dest` itself
    /// does not.
    fn place(&self, source: &Path, dest: &Path) -> io::Result<()>;

    /// Undo a placement. `source` is where the file came from; only the
    /// move strategy needs it.
    fn remove(&self, source: &Path, dest: &Path) -> io::Result<()> {
        let _ = source;
        std::fs::remove_file(dest)
    }

    /// Whether a placement stays valid when its source file is gone.
    ///
    /// True only for the move strategy, where activation consumes the
    /// source: a missing source with an intact destination is the
    /// deployed state, not a stale row.
    fn carries_missing_source(&self) -> bool {
        false
    }
}

/// Build the method for `kind`, bound to `game_id` for the
/// cross-contamination guard.
pub fn create_method(kind: MethodKind, game_id: &str) -> Box<dyn DeploymentMethod + Send> {
    match kind {
        MethodKind::Hardlink => Box::new(FsDeploymentMethod::new(HardlinkPlacement, game_id)),
        MethodKind::Symlink => Box::new(FsDeploymentMethod::new(SymlinkPlacement, game_id)),
        MethodKind::Copy => Box::new(FsDeploymentMethod::new(CopyPlacement, game_id)),
        MethodKind::Move => Box::new(FsDeploymentMethod::new(MovePlacement, game_id)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_every_kind() {
        for kind in [
            MethodKind::Hardlink,
            MethodKind::Symlink,
            MethodKind::Copy,
            MethodKind::Move,
        ] {
            let method = create_method(kind, "skyrim");
            assert_eq!(method.kind(), kind);
        }
    }
}
