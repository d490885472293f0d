use crate::{
    batch::{
        BATCH_SIZE, BatchError, FreshOutcome, PlaylistSync, RunOutcome, StateStore, TrackSource,
        plan_batch, run_batch,
    },
    error, info,
    management::{RunLock, TrackerStateManager},
    success, warning,
};

use super::connect;

pub async fn batch(dry_run: bool) {
    let client = connect().await;
    let store = TrackerStateManager::from_config();

    if dry_run {
        preview(&client, &store).await;
        return;
    }

    match run_locked(&client, &client, &store).await {
        Ok(outcome) => report(&outcome),
        Err(e) => {
            report_partial(&e);
            error!("Batch run failed, tracker state left unchanged. Err: {}", e)
        }
    }
}

/// Runs one batch while holding the tracker lock.
pub(super) async fn run_locked<S, P>(
    source: &S,
    sync: &P,
    store: &TrackerStateManager,
) -> Result<RunOutcome, BatchError>
where
    S: TrackSource,
    P: PlaylistSync,
{
    let _lock = RunLock::acquire(store.lock_path()).await?;
    run_batch(source, sync, store).await
}

pub(super) fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::Aborted {
            batch_number,
            available,
            required,
        } => info!(
            "Skipping batch #{}: insufficient liked tracks for next batch ({} of {}).",
            batch_number, available, required
        ),
        RunOutcome::Completed {
            batch_number,
            all_playlist,
            all,
            fresh,
            carryover,
            oversized_carryover,
        } => {
            success!("Playlist {} {}.", all_playlist, all.as_str());
            match fresh {
                FreshOutcome::Published { playlist, outcome } => {
                    success!("Playlist {} {}.", playlist, outcome.as_str())
                }
                FreshOutcome::Deferred { candidates } => info!(
                    "Skipping fresh playlist for batch #{}: {} of {} fresh tracks queued.",
                    batch_number, candidates, BATCH_SIZE
                ),
            }
            success!(
                "Batch #{} done, {} tracks carried over, next batch is #{}.",
                batch_number,
                carryover,
                batch_number + 1
            );
            if *oversized_carryover {
                warn_oversized_carryover(*carryover);
            }
        }
    }
}

/// Reports the playlists a failed run still published.
pub(super) fn report_partial(e: &BatchError) {
    if let Some((playlist, outcome)) = e.published_all() {
        success!("Playlist {} {}.", playlist, outcome.as_str());
    }
}

fn warn_oversized_carryover(carryover: usize) {
    warning!(
        "Carryover queue holds {} tracks, at least one full batch of {}. Check the tracker state with likedcli state.",
        carryover,
        BATCH_SIZE
    );
}

/// Prints what the next run would publish and commit, without side effects.
async fn preview<S: TrackSource>(source: &S, store: &TrackerStateManager) {
    let state = match store.load().await {
        Ok(state) => state,
        Err(e) => error!("{}", e),
    };
    let liked = match source.fetch_liked_tracks().await {
        Ok(liked) => liked,
        Err(e) => error!("Failed to fetch liked songs. Err: {}", e),
    };

    match plan_batch(&state, &liked) {
        Ok(plan) => {
            info!(
                "Would publish {} with {} tracks.",
                plan.all_playlist_name(),
                plan.all.len()
            );
            match &plan.fresh {
                Some(fresh) => info!(
                    "Would publish {} with {} tracks.",
                    plan.fresh_playlist_name(),
                    fresh.len()
                ),
                None => info!(
                    "Would defer {}: {} of {} fresh tracks queued.",
                    plan.fresh_playlist_name(),
                    plan.next_state.carryover_ids().len(),
                    BATCH_SIZE
                ),
            }
            info!(
                "Would archive {} tracks in total and continue with batch #{}.",
                plan.next_state.archived_ids().len(),
                plan.next_state.batch_number()
            );
            if plan.oversized_carryover() {
                warn_oversized_carryover(plan.next_state.carryover_ids().len());
            }
        }
        Err(BatchError::InsufficientTracks {
            batch_number,
            available,
            required,
        }) => report(&RunOutcome::Aborted {
            batch_number,
            available,
            required,
        }),
        Err(e) => warning!("{}", e),
    }
}
