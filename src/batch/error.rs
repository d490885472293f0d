use std::path::PathBuf;

use thiserror::Error;

use super::SyncOutcome;

#[derive(Debug, Error)]
pub enum BatchError {
    /// Not enough liked tracks to fill the window of the next batch. This is an
    /// expected outcome between runs and leaves the tracker untouched.
    #[error(
        "insufficient liked tracks for next batch #{batch_number}: {available} of {required} available"
    )]
    InsufficientTracks {
        batch_number: u32,
        available: usize,
        required: usize,
    },

    #[error("{context}: {source}")]
    ExternalService {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The All playlist was published but the Fresh sync failed afterwards.
    /// The state is not committed; a repeated run replaces the All playlist.
    #[error(
        "playlist {all_playlist} {}, but failed to sync playlist {fresh_playlist}: {source}",
        .all.as_str()
    )]
    FreshSyncFailed {
        batch_number: u32,
        all_playlist: String,
        all: SyncOutcome,
        fresh_playlist: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("tracker state at {} is corrupt: {reason}", .path.display())]
    StateCorruption { path: PathBuf, reason: String },

    #[error("another run holds the lock at {}", .path.display())]
    Locked { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl BatchError {
    pub fn external(
        context: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::ExternalService {
            context: context.into(),
            source,
        }
    }

    /// The All playlist a failed run still published, with its sync outcome.
    pub fn published_all(&self) -> Option<(&str, SyncOutcome)> {
        match self {
            Self::FreshSyncFailed {
                all_playlist, all, ..
            } => Some((all_playlist.as_str(), *all)),
            _ => None,
        }
    }
}
