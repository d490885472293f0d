use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{batch::BatchError, warning};

/// Exclusive lock held for the duration of a batch run.
///
/// The lock file is created with `create_new`, so a second run fails instead of
/// racing on the tracker state. It holds the pid of its owner and is removed
/// again when the guard drops. A lock left behind by a killed run is reclaimed
/// once its pid no longer belongs to a live process.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    /// Takes the lock at `path`, creating its parent directory if needed.
    ///
    /// # Errors
    ///
    /// - [`BatchError::Locked`] if a live process holds the lock
    /// - [`BatchError::Io`] if the lock file cannot be created or written
    pub async fn acquire(path: PathBuf) -> Result<Self, BatchError> {
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let path = match Self::create(path).await {
            Err(BatchError::Locked { path }) => path,
            result => return result,
        };
        if !is_stale(&path).await {
            return Err(BatchError::Locked { path });
        }

        warning!(
            "Removing stale lock {} left by a run that is no longer alive.",
            path.display()
        );
        match async_fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(BatchError::Io(e)),
        }
        Self::create(path).await
    }

    async fn create(path: PathBuf) -> Result<Self, BatchError> {
        match async_fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(BatchError::Locked { path });
            }
            Err(e) => return Err(BatchError::Io(e)),
        }

        let lock = Self { path };
        async_fs::write(&lock.path, std::process::id().to_string()).await?;
        Ok(lock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// A lock is stale when it names a pid that is not running. A lock without a
/// readable pid may still be in the middle of being written and is kept.
async fn is_stale(path: &Path) -> bool {
    let Ok(content) = async_fs::read_to_string(path).await else {
        return false;
    };
    match content.trim().parse::<u32>() {
        Ok(pid) => !process_alive(pid),
        Err(_) => false,
    }
}

#[cfg(target_os = "linux")]
fn process_alive(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

// Without procfs there is no dependency-free liveness check; never reclaim.
#[cfg(not(target_os = "linux"))]
fn process_alive(_pid: u32) -> bool {
    true
}
