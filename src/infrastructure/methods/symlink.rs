//! Symlink placement
//!
//! Works across filesystems but is visible to the game as a link; some
//! engines refuse to load linked files, which is why the strategy is
//! per-game configuration.

use std::io;
use std::path::Path;

use crate::domain::ports::MethodKind;

use super::Placement;

#[derive(Debug, Clone, Copy, Default)]
pub struct SymlinkPlacement;

impl Placement for SymlinkPlacement {
    fn kind(&self) -> MethodKind {
        MethodKind::Symlink
    }

    #[cfg(unix)]
    fn place(&self, source: &Path, dest: &Path) -> io::Result<()> {
        std::os::unix::fs::symlink(source, dest)
    }

    #[cfg(windows)]
    fn place(&self, source: &Path, dest: &Path) -> io::Result<()> {
        std::os::windows::fs::symlink_file(source, dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn place_creates_symlink() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, "data").unwrap();

        SymlinkPlacement.place(&src, &dst).unwrap();

        assert!(fs::symlink_metadata(&dst).unwrap().is_symlink());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "data");
    }

    #[test]
    fn remove_deletes_link_but_keeps_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, "data").unwrap();
        SymlinkPlacement.place(&src, &dst).unwrap();

        SymlinkPlacement.remove(&src, &dst).unwrap();

        assert!(!dst.exists());
        assert!(src.exists());
    }
}
