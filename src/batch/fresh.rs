use super::{BATCH_SIZE, CarryoverQueue, TrackId, TrackerState};

/// Outcome of splitting the fresh candidates of one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshResolution {
    /// Tracks for the Fresh playlist; `None` when fewer than `BATCH_SIZE`
    /// candidates exist and the playlist is deferred.
    pub fresh: Option<Vec<TrackId>>,
    /// Queue to persist for the next run.
    pub carryover: CarryoverQueue,
}

/// Builds the candidate queue for a window: carryover first, then window tracks
/// that are neither archived nor already queued, each part in its own order.
pub fn fresh_candidates(window: &[TrackId], state: &TrackerState) -> CarryoverQueue {
    let mut candidates = state.carryover_ids().clone();

    for id in window {
        if state.is_archived(id) || candidates.contains(id) {
            continue;
        }
        candidates.push_back(id.clone());
    }

    candidates
}

/// Decides which candidates are emitted as the Fresh batch and which carry over.
///
/// With at least `BATCH_SIZE` candidates the oldest `BATCH_SIZE` are emitted
/// and the rest stay queued in order. Otherwise nothing is emitted and every
/// candidate carries over.
pub fn resolve_fresh(window: &[TrackId], state: &TrackerState) -> FreshResolution {
    let mut carryover = fresh_candidates(window, state);

    if carryover.len() < BATCH_SIZE {
        return FreshResolution {
            fresh: None,
            carryover,
        };
    }

    let fresh = carryover.take_front(BATCH_SIZE);
    FreshResolution {
        fresh: Some(fresh),
        carryover,
    }
}
