//! Exclusive lock on the storage directory.
//!
//! Mutating commands hold a `StorageLock` across load-modify-save so a
//! second `pm` process cannot silently overwrite their changes.  On Unix
//! this is a non-blocking `flock` on `<dir>/.lock`; elsewhere it is a
//! no-op.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::errors::{PmError, Result};

/// Guard that holds the exclusive lock for its lifetime.
#[derive(Debug)]
pub struct StorageLock {
    file: File,
    path: PathBuf,
}

impl StorageLock {
    /// Open (or create) the lock file and take the lock without blocking.
    ///
    /// Fails with `StorageLocked` if another holder exists.
    pub fn acquire(lock_path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)?;

        if !try_lock_exclusive(&file)? {
            let dir = lock_path.parent().unwrap_or(lock_path).to_path_buf();
            return Err(PmError::StorageLocked(dir));
        }

        tracing::debug!(path = %lock_path.display(), "storage lock acquired");
        Ok(Self {
            file,
            path: lock_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StorageLock {
    fn drop(&mut self) {
        let _ = unlock(&self.file);
        tracing::debug!(path = %self.path.display(), "storage lock released");
    }
}

// ── Unix flock ──────────────────────────────────────────────────────

#[cfg(unix)]
fn try_lock_exclusive(file: &File) -> std::io::Result<bool> {
    use std::os::unix::io::AsRawFd;

    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(true)
    } else {
        let err = std::io::Error::last_os_error();
        if err.kind() == std::io::ErrorKind::WouldBlock {
            Ok(false)
        } else {
            Err(err)
        }
    }
}

#[cfg(unix)]
fn unlock(file: &File) -> std::io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let result = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_UN) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

// ── Other platforms ─────────────────────────────────────────────────

#[cfg(not(unix))]
fn try_lock_exclusive(_file: &File) -> std::io::Result<bool> {
    Ok(true)
}

#[cfg(not(unix))]
fn unlock(_file: &File) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_can_be_reacquired_after_drop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lock");

        let guard = StorageLock::acquire(&path).unwrap();
        assert_eq!(guard.path(), path);
        drop(guard);

        assert!(StorageLock::acquire(&path).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn second_holder_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".lock");

        let _guard = StorageLock::acquire(&path).unwrap();
        let second = StorageLock::acquire(&path);
        assert!(matches!(second, Err(PmError::StorageLocked(p)) if p == dir.path()));
    }
}
