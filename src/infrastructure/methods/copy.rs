//! Copy placement
//!
//! Slowest strategy but invisible to the game and safe across devices.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::ports::MethodKind;

use super::Placement;

#[derive(Debug, Clone, Copy, Default)]
pub struct CopyPlacement;

impl Placement for CopyPlacement {
    fn kind(&self) -> MethodKind {
        MethodKind::Copy
    }

    fn place(&self, source: &Path, dest: &Path) -> io::Result<()> {
        fs::copy(source, dest).map(|_| ())
    }
}
