//! Move placement
//!
//! Relocates files out of the installation root instead of mirroring
//! them. Removal restores the file to its source path, so purge puts
//! the installation back together.

use std::fs;
use std::io;
use std::path::Path;

use crate::domain::ports::MethodKind;

use super::Placement;

#[derive(Debug, Clone, Copy, Default)]
pub struct MovePlacement;

/// Rename, falling back to copy+delete when crossing devices.
fn transfer(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(err) if err.raw_os_error() == Some(libc_exdev()) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn libc_exdev() -> i32 {
    18 // EXDEV
}

#[cfg(windows)]
fn libc_exdev() -> i32 {
    17 // ERROR_NOT_SAME_DEVICE
}

impl Placement for MovePlacement {
    fn kind(&self) -> MethodKind {
        MethodKind::Move
    }

    fn place(&self, source: &Path, dest: &Path) -> io::Result<()> {
        transfer(source, dest)
    }

    fn remove(&self, source: &Path, dest: &Path) -> io::Result<()> {
        if let Some(parent) = source.parent() {
            fs::create_dir_all(parent)?;
        }
        transfer(dest, source)
    }

    fn carries_missing_source(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn place_consumes_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, "data").unwrap();

        MovePlacement.place(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "data");
    }

    #[test]
    fn remove_restores_source() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("staging").join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::create_dir_all(src.parent().unwrap()).unwrap();
        fs::write(&src, "data").unwrap();
        MovePlacement.place(&src, &dst).unwrap();

        // Staging dir removed in between; restore recreates it
        fs::remove_dir_all(dir.path().join("staging")).unwrap();
        MovePlacement.remove(&src, &dst).unwrap();

        assert!(!dst.exists());
        assert_eq!(fs::read_to_string(&src).unwrap(), "data");
    }
}
