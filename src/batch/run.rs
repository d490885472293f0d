use crate::Res;

use super::{
    BatchError, TrackId, TrackerState, all_playlist_name, batch_window, dedup_liked,
    fresh_playlist_name, resolve_fresh,
};

/// Supplies the user's liked tracks, newest first.
#[allow(async_fn_in_trait)]
pub trait TrackSource {
    async fn fetch_liked_tracks(&self) -> Res<Vec<TrackId>>;
}

/// Creates a playlist with the exact given name, or replaces the contents of
/// the existing one.
#[allow(async_fn_in_trait)]
pub trait PlaylistSync {
    async fn sync_playlist(&self, name: &str, tracks: &[TrackId]) -> Res<SyncOutcome>;
}

/// Durable home of the [`TrackerState`]. `persist` is the commit point of a run
/// and must replace the previous state all at once.
#[allow(async_fn_in_trait)]
pub trait StateStore {
    async fn load(&self) -> Result<TrackerState, BatchError>;
    async fn persist(&self, state: &TrackerState) -> Result<(), BatchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
}

impl SyncOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncOutcome::Created => "created",
            SyncOutcome::Updated => "updated",
        }
    }
}

/// Everything a run is going to publish and commit, computed without I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub batch_number: u32,
    pub all: Vec<TrackId>,
    pub fresh: Option<Vec<TrackId>>,
    pub next_state: TrackerState,
}

impl BatchPlan {
    pub fn all_playlist_name(&self) -> String {
        all_playlist_name(self.batch_number)
    }

    pub fn fresh_playlist_name(&self) -> String {
        fresh_playlist_name(self.batch_number)
    }

    /// True when the queue left after this run still holds a batch or more.
    pub fn oversized_carryover(&self) -> bool {
        self.next_state.carryover_ids().exceeds_batch()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreshOutcome {
    Published {
        playlist: String,
        outcome: SyncOutcome,
    },
    /// Fewer than a batch worth of candidates; all of them were carried over.
    Deferred { candidates: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The window for `batch_number` was undersized. Nothing was published and
    /// the tracker state was left as it was.
    Aborted {
        batch_number: u32,
        available: usize,
        required: usize,
    },
    Completed {
        batch_number: u32,
        all_playlist: String,
        all: SyncOutcome,
        fresh: FreshOutcome,
        carryover: usize,
        /// The carryover queue holds a batch or more and should be inspected.
        oversized_carryover: bool,
    },
}

/// Pure state transition of a batch run.
///
/// Deduplicates `liked`, cuts the window for the current batch and resolves the
/// Fresh tracks. Fails with [`BatchError::InsufficientTracks`] when the window
/// is undersized; `state` is never touched.
pub fn plan_batch(state: &TrackerState, liked: &[TrackId]) -> Result<BatchPlan, BatchError> {
    let liked = dedup_liked(liked.iter().cloned());
    let batch_number = state.batch_number();
    let window = batch_window(&liked, batch_number)?;
    let resolution = resolve_fresh(window, state);

    let emitted = resolution.fresh.as_deref().unwrap_or_default();
    let next_state = state.advance(emitted, resolution.carryover);

    Ok(BatchPlan {
        batch_number,
        all: window.to_vec(),
        fresh: resolution.fresh,
        next_state,
    })
}

/// Runs one batch end to end.
///
/// Playlists are synced first, All before Fresh, and the new state is
/// persisted only after every sync succeeded. A failure anywhere before the
/// commit leaves the stored state as it was, so the run can simply be repeated.
/// When only the Fresh sync fails, [`BatchError::FreshSyncFailed`] still
/// carries the outcome of the All playlist.
pub async fn run_batch<S, P, T>(source: &S, sync: &P, store: &T) -> Result<RunOutcome, BatchError>
where
    S: TrackSource,
    P: PlaylistSync,
    T: StateStore,
{
    let state = store.load().await?;
    let liked = source
        .fetch_liked_tracks()
        .await
        .map_err(|e| BatchError::external("failed to fetch liked tracks", e))?;

    let plan = match plan_batch(&state, &liked) {
        Ok(plan) => plan,
        Err(BatchError::InsufficientTracks {
            batch_number,
            available,
            required,
        }) => {
            return Ok(RunOutcome::Aborted {
                batch_number,
                available,
                required,
            });
        }
        Err(e) => return Err(e),
    };

    let all_playlist = plan.all_playlist_name();
    let all = sync
        .sync_playlist(&all_playlist, &plan.all)
        .await
        .map_err(|e| BatchError::external(format!("failed to sync playlist {all_playlist}"), e))?;

    let fresh = match &plan.fresh {
        Some(tracks) => {
            let playlist = plan.fresh_playlist_name();
            match sync.sync_playlist(&playlist, tracks).await {
                Ok(outcome) => FreshOutcome::Published { playlist, outcome },
                Err(source) => {
                    return Err(BatchError::FreshSyncFailed {
                        batch_number: plan.batch_number,
                        all_playlist,
                        all,
                        fresh_playlist: playlist,
                        source,
                    });
                }
            }
        }
        None => FreshOutcome::Deferred {
            candidates: plan.next_state.carryover_ids().len(),
        },
    };

    store.persist(&plan.next_state).await?;

    Ok(RunOutcome::Completed {
        batch_number: plan.batch_number,
        all_playlist,
        all,
        fresh,
        carryover: plan.next_state.carryover_ids().len(),
        oversized_carryover: plan.oversized_carryover(),
    })
}
