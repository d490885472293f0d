use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    batch::{BatchError, StateStore, TrackerState},
    config,
};

/// File backed [`StateStore`] for the batch tracker.
///
/// A missing file is a first run and loads as [`TrackerState::initial`].
/// Anything that exists but cannot be parsed or breaks the state invariants is
/// reported as corrupt and never replaced by defaults.
pub struct TrackerStateManager {
    path: PathBuf,
}

impl TrackerStateManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Manager for the configured state file (`LIKEDCLI_STATE_FILE`, or
    /// `state/tracker.json` in the local data directory).
    pub fn from_config() -> Self {
        Self::new(config::tracker_state_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file used to exclude overlapping runs.
    pub fn lock_path(&self) -> PathBuf {
        self.path.with_extension("lock")
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    /// Flushes the directory entry of the state file so a completed rename
    /// survives a power loss.
    #[cfg(unix)]
    async fn sync_parent(&self) -> Result<(), BatchError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        async_fs::File::open(parent).await?.sync_all().await?;
        Ok(())
    }

    // Directories cannot be opened for syncing here.
    #[cfg(not(unix))]
    async fn sync_parent(&self) -> Result<(), BatchError> {
        Ok(())
    }

    fn corrupt(&self, reason: impl Into<String>) -> BatchError {
        BatchError::StateCorruption {
            path: self.path.clone(),
            reason: reason.into(),
        }
    }
}

impl StateStore for TrackerStateManager {
    async fn load(&self) -> Result<TrackerState, BatchError> {
        let json = match async_fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(TrackerState::initial()),
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(self.corrupt(format!("not valid UTF-8: {e}")));
            }
            Err(e) => return Err(BatchError::Io(e)),
        };

        let state: TrackerState =
            serde_json::from_str(&json).map_err(|e| self.corrupt(e.to_string()))?;
        state.validate().map_err(|reason| self.corrupt(reason))?;
        Ok(state)
    }

    /// Writes the state to a temporary sibling, flushes it and renames it over
    /// the state file, so readers see either the old or the new state.
    async fn persist(&self, state: &TrackerState) -> Result<(), BatchError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(state)
            .map_err(|e| BatchError::Io(std::io::Error::other(e)))?;
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        async_fs::File::open(&tmp).await?.sync_all().await?;
        async_fs::rename(&tmp, &self.path).await?;
        self.sync_parent().await?;
        Ok(())
    }
}
