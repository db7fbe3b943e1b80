//! Session lock - one deployment session per destination
//!
//! Advisory file lock inside the destination root. Acquisition never
//! blocks: a held lock means another session is in flight and the
//! caller gets a distinct error instead of corrupted state.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::error::{EngineError, EngineResult};

/// Name of the lock file inside the destination root
pub const LOCK_FILE: &str = ".modlink.lock";

/// Exclusive hold on a destination for the duration of one session
#[derive(Debug)]
pub struct SessionLock {
    file: File,
    destination: PathBuf,
}

impl SessionLock {
    /// Acquire the lock, failing fast if another session holds it
    pub fn acquire(destination: &Path) -> EngineResult<Self> {
        fs::create_dir_all(destination)?;
        let file = File::create(destination.join(LOCK_FILE))?;
        file.try_lock_exclusive()
            .map_err(|_| EngineError::SessionInProgress {
                destination: destination.to_path_buf(),
            })?;
        Ok(Self {
            file,
            destination: destination.to_path_buf(),
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        // The lock file itself stays behind; unlinking it here would race
        // with a waiter that just opened it.
        let _ = fs2::FileExt::unlock(&self.file);
    }
}
