//! Hardlink placement
//!
//! Fastest strategy when the installation root and the game directory
//! share a filesystem. Cross-device links fail per-file and are
//! reported as warnings by the session engine.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::ports::MethodKind;

use super::Placement;

#[derive(Debug, Clone, Copy, Default)]
pub struct HardlinkPlacement;

impl Placement for HardlinkPlacement {
    fn kind(&self) -> MethodKind {
        MethodKind::Hardlink
    }

    fn place(&self, source: &Path, dest: &Path) -> io::Result<()> {
        fs::hard_link(source, dest)
    }
}
