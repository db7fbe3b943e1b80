//! Filesystem helpers shared by strategies and the store
//!
//! Atomic writes use the tempfile + rename pattern so a crash mid-write
//! never leaves a half-written file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

/// Write `content` to `path` atomically, creating parent directories.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Last-modified time of `path` in epoch milliseconds.
pub fn mtime_ms(path: &Path) -> io::Result<u64> {
    let modified = fs::metadata(path)?.modified()?;
    let ms = modified
        .duration_since(UNIX_EPOCH)
        .map_err(|e| io::Error::other(e.to_string()))?
        .as_millis();
    Ok(ms as u64)
}

/// Remove now-empty directories between `path`'s parent and `root`.
///
/// Stops at the first non-empty directory. `root` itself is never
/// removed. Errors are ignored: a directory that refuses to go away is
/// simply left in place.
pub fn prune_empty_parents(path: &Path, root: &Path) {
    let mut current = path.parent();
    while let Some(dir) = current {
        if dir == root || !dir.starts_with(root) {
            break;
        }
        if fs::remove_dir(dir).is_err() {
            break;
        }
        current = dir.parent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn atomic_write_creates_parents_and_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("file.txt");

        atomic_write(&path, b"hello").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn atomic_write_replaces_existing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.txt");

        fs::write(&path, "old").unwrap();
        atomic_write(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn mtime_ms_is_nonzero_for_fresh_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("file.txt");
        fs::write(&path, "content").unwrap();

        assert!(mtime_ms(&path).unwrap() > 0);
    }

    #[test]
    fn prune_removes_empty_chain_but_not_root() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let file = root.join("a").join("b").join("c.txt");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, "x").unwrap();
        fs::remove_file(&file).unwrap();

        prune_empty_parents(&file, root);

        assert!(!root.join("a").exists());
        assert!(root.exists());
    }

    #[test]
    fn prune_stops_at_non_empty_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("a").join("b")).unwrap();
        fs::write(root.join("a").join("keep.txt"), "x").unwrap();

        prune_empty_parents(&root.join("a").join("b").join("gone.txt"), root);

        assert!(!root.join("a").join("b").exists());
        assert!(root.join("a").join("keep.txt").exists());
    }
}
