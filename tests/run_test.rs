use std::{collections::HashSet, sync::Mutex};

use likedcli::{Res, batch::*};

fn tracks(from: usize, to: usize) -> Vec<TrackId> {
    (from..=to).map(|i| TrackId::new(format!("T{}", i))).collect()
}

struct FakeSource {
    liked: Vec<TrackId>,
    offline: bool,
}

impl FakeSource {
    fn new(liked: Vec<TrackId>) -> Self {
        Self {
            liked,
            offline: false,
        }
    }
}

impl TrackSource for FakeSource {
    async fn fetch_liked_tracks(&self) -> Res<Vec<TrackId>> {
        if self.offline {
            return Err("connection refused".into());
        }
        Ok(self.liked.clone())
    }
}

#[derive(Default)]
struct FakeSync {
    calls: Mutex<Vec<(String, Vec<TrackId>)>>,
    existing: Mutex<HashSet<String>>,
    fail_on: Option<String>,
}

impl FakeSync {
    fn failing_on(name: &str) -> Self {
        Self {
            fail_on: Some(name.to_string()),
            ..Self::default()
        }
    }

    fn names(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl PlaylistSync for FakeSync {
    async fn sync_playlist(&self, name: &str, tracks: &[TrackId]) -> Res<SyncOutcome> {
        if self.fail_on.as_deref() == Some(name) {
            return Err("503 Service Unavailable".into());
        }
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), tracks.to_vec()));
        if self.existing.lock().unwrap().insert(name.to_string()) {
            Ok(SyncOutcome::Created)
        } else {
            Ok(SyncOutcome::Updated)
        }
    }
}

struct MemoryStore {
    state: Mutex<TrackerState>,
    persisted: Mutex<usize>,
}

impl MemoryStore {
    fn new(state: TrackerState) -> Self {
        Self {
            state: Mutex::new(state),
            persisted: Mutex::new(0),
        }
    }

    fn current(&self) -> TrackerState {
        self.state.lock().unwrap().clone()
    }

    fn persist_count(&self) -> usize {
        *self.persisted.lock().unwrap()
    }
}

impl StateStore for MemoryStore {
    async fn load(&self) -> Result<TrackerState, BatchError> {
        Ok(self.current())
    }

    async fn persist(&self, state: &TrackerState) -> Result<(), BatchError> {
        *self.state.lock().unwrap() = state.clone();
        *self.persisted.lock().unwrap() += 1;
        Ok(())
    }
}

#[tokio::test]
async fn test_first_run_publishes_all_and_fresh() {
    let source = FakeSource::new(tracks(1, 50));
    let sync = FakeSync::default();
    let store = MemoryStore::new(TrackerState::initial());

    let outcome = run_batch(&source, &sync, &store).await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Completed {
            batch_number: 1,
            all_playlist: "Liked Songs #1 (All)".to_string(),
            all: SyncOutcome::Created,
            fresh: FreshOutcome::Published {
                playlist: "Liked Songs #1 (Fresh)".to_string(),
                outcome: SyncOutcome::Created,
            },
            carryover: 0,
            oversized_carryover: false,
        }
    );

    let calls = sync.calls.lock().unwrap().clone();
    assert_eq!(
        calls,
        vec![
            ("Liked Songs #1 (All)".to_string(), tracks(1, 50)),
            ("Liked Songs #1 (Fresh)".to_string(), tracks(1, 50)),
        ]
    );

    let state = store.current();
    assert_eq!(state.batch_number(), 2);
    assert_eq!(state.archived_ids().len(), 50);
    assert!(state.carryover_ids().is_empty());
    assert_eq!(store.persist_count(), 1);
}

#[tokio::test]
async fn test_undersized_window_aborts_without_side_effects() {
    let source = FakeSource::new(tracks(1, 49));
    let sync = FakeSync::default();
    let store = MemoryStore::new(TrackerState::initial());

    let outcome = run_batch(&source, &sync, &store).await.unwrap();

    assert_eq!(
        outcome,
        RunOutcome::Aborted {
            batch_number: 1,
            available: 49,
            required: BATCH_SIZE,
        }
    );
    assert!(sync.names().is_empty());
    assert_eq!(store.persist_count(), 0);
    assert_eq!(store.current(), TrackerState::initial());
}

#[tokio::test]
async fn test_deferred_fresh_still_advances_batch() {
    let before = TrackerState::new(tracks(51, 80), Vec::new(), 2).unwrap();
    let source = FakeSource::new(tracks(1, 100));
    let sync = FakeSync::default();
    let store = MemoryStore::new(before);

    let outcome = run_batch(&source, &sync, &store).await.unwrap();

    match outcome {
        RunOutcome::Completed {
            batch_number,
            fresh,
            carryover,
            ..
        } => {
            assert_eq!(batch_number, 2);
            assert_eq!(fresh, FreshOutcome::Deferred { candidates: 20 });
            assert_eq!(carryover, 20);
        }
        other => panic!("expected completed run, got {:?}", other),
    }
    assert_eq!(sync.names(), vec!["Liked Songs #2 (All)".to_string()]);

    let state = store.current();
    assert_eq!(state.batch_number(), 3);
    let carryover: Vec<TrackId> = state.carryover_ids().iter().cloned().collect();
    assert_eq!(carryover, tracks(81, 100));
}

#[tokio::test]
async fn test_failed_all_sync_leaves_state_untouched() {
    let source = FakeSource::new(tracks(1, 50));
    let sync = FakeSync::failing_on("Liked Songs #1 (All)");
    let store = MemoryStore::new(TrackerState::initial());

    let err = run_batch(&source, &sync, &store).await.unwrap_err();

    assert!(matches!(err, BatchError::ExternalService { .. }));
    assert!(err.to_string().contains("Liked Songs #1 (All)"));
    assert!(sync.names().is_empty());
    assert_eq!(store.persist_count(), 0);
    assert_eq!(store.current(), TrackerState::initial());
}

#[tokio::test]
async fn test_failed_fresh_sync_leaves_state_untouched() {
    let source = FakeSource::new(tracks(1, 50));
    let sync = FakeSync::failing_on("Liked Songs #1 (Fresh)");
    let store = MemoryStore::new(TrackerState::initial());

    let err = run_batch(&source, &sync, &store).await.unwrap_err();

    match &err {
        BatchError::FreshSyncFailed {
            batch_number,
            all_playlist,
            all,
            fresh_playlist,
            ..
        } => {
            assert_eq!(*batch_number, 1);
            assert_eq!(all_playlist, "Liked Songs #1 (All)");
            assert_eq!(*all, SyncOutcome::Created);
            assert_eq!(fresh_playlist, "Liked Songs #1 (Fresh)");
        }
        other => panic!("expected fresh sync failure, got {:?}", other),
    }
    assert_eq!(
        err.published_all(),
        Some(("Liked Songs #1 (All)", SyncOutcome::Created))
    );
    assert!(err.to_string().contains("Liked Songs #1 (All) created"));
    assert!(err.to_string().contains("503 Service Unavailable"));
    assert_eq!(sync.names(), vec!["Liked Songs #1 (All)".to_string()]);
    assert_eq!(store.persist_count(), 0);
    assert_eq!(store.current(), TrackerState::initial());
}

#[tokio::test]
async fn test_failed_all_sync_reports_no_published_playlist() {
    let source = FakeSource::new(tracks(1, 50));
    let sync = FakeSync::failing_on("Liked Songs #1 (All)");
    let store = MemoryStore::new(TrackerState::initial());

    let err = run_batch(&source, &sync, &store).await.unwrap_err();

    assert_eq!(err.published_all(), None);
}

#[tokio::test]
async fn test_oversized_carryover_is_flagged() {
    let carryover: Vec<TrackId> = (1..=120).map(|i| TrackId::new(format!("C{}", i))).collect();
    let before = TrackerState::new(Vec::new(), carryover, 1).unwrap();
    let source = FakeSource::new(tracks(1, 50));
    let sync = FakeSync::default();
    let store = MemoryStore::new(before.clone());

    let plan = plan_batch(&before, &tracks(1, 50)).unwrap();
    assert!(plan.oversized_carryover());

    match run_batch(&source, &sync, &store).await.unwrap() {
        RunOutcome::Completed {
            fresh,
            carryover,
            oversized_carryover,
            ..
        } => {
            assert!(matches!(fresh, FreshOutcome::Published { .. }));
            assert_eq!(carryover, 120);
            assert!(oversized_carryover);
        }
        other => panic!("expected completed run, got {:?}", other),
    }
    // the queue is kept as it is, oldest entries were emitted first
    let state = store.current();
    assert_eq!(state.carryover_ids().len(), 120);
    assert_eq!(
        state.carryover_ids().iter().next(),
        Some(&TrackId::new("C51"))
    );
}

#[tokio::test]
async fn test_small_carryover_is_not_flagged() {
    let before = TrackerState::new(tracks(51, 80), Vec::new(), 2).unwrap();
    let plan = plan_batch(&before, &tracks(1, 100)).unwrap();

    assert_eq!(plan.next_state.carryover_ids().len(), 20);
    assert!(!plan.oversized_carryover());
}

#[tokio::test]
async fn test_retry_after_failure_republishes_same_batch() {
    let source = FakeSource::new(tracks(1, 50));
    let store = MemoryStore::new(TrackerState::initial());

    let failing = FakeSync::failing_on("Liked Songs #1 (Fresh)");
    assert!(run_batch(&source, &failing, &store).await.is_err());

    let sync = FakeSync::default();
    sync.existing
        .lock()
        .unwrap()
        .insert("Liked Songs #1 (All)".to_string());

    let outcome = run_batch(&source, &sync, &store).await.unwrap();
    match outcome {
        RunOutcome::Completed {
            batch_number, all, ..
        } => {
            assert_eq!(batch_number, 1);
            assert_eq!(all, SyncOutcome::Updated);
        }
        other => panic!("expected completed run, got {:?}", other),
    }
    assert_eq!(store.current().batch_number(), 2);
}

#[tokio::test]
async fn test_unreachable_source_is_external_failure() {
    let source = FakeSource {
        liked: tracks(1, 50),
        offline: true,
    };
    let sync = FakeSync::default();
    let store = MemoryStore::new(TrackerState::initial());

    let err = run_batch(&source, &sync, &store).await.unwrap_err();

    assert!(matches!(err, BatchError::ExternalService { .. }));
    assert!(sync.names().is_empty());
    assert_eq!(store.persist_count(), 0);
}

#[tokio::test]
async fn test_consecutive_runs_advance_one_batch_each() {
    let source = FakeSource::new(tracks(1, 120));
    let sync = FakeSync::default();
    let store = MemoryStore::new(TrackerState::initial());

    for expected in 1..=2 {
        match run_batch(&source, &sync, &store).await.unwrap() {
            RunOutcome::Completed { batch_number, .. } => assert_eq!(batch_number, expected),
            other => panic!("expected completed run, got {:?}", other),
        }
    }

    // only 20 tracks left for batch 3
    assert!(matches!(
        run_batch(&source, &sync, &store).await.unwrap(),
        RunOutcome::Aborted {
            batch_number: 3,
            available: 20,
            ..
        }
    ));
    assert_eq!(store.current().batch_number(), 3);
    assert_eq!(store.current().archived_ids().len(), 100);
    assert_eq!(store.persist_count(), 2);
}
