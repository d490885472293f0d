use std::sync::Mutex;

use likedcli::{
    Res,
    batch::*,
    management::{RunLock, TrackerStateManager},
};
use tempfile::TempDir;

fn tracks(from: usize, to: usize) -> Vec<TrackId> {
    (from..=to).map(|i| TrackId::new(format!("T{}", i))).collect()
}

fn manager(dir: &TempDir) -> TrackerStateManager {
    TrackerStateManager::new(dir.path().join("state").join("tracker.json"))
}

struct StaticSource(Vec<TrackId>);

impl TrackSource for StaticSource {
    async fn fetch_liked_tracks(&self) -> Res<Vec<TrackId>> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct RecordingSync(Mutex<Vec<String>>);

impl PlaylistSync for RecordingSync {
    async fn sync_playlist(&self, name: &str, _tracks: &[TrackId]) -> Res<SyncOutcome> {
        self.0.lock().unwrap().push(name.to_string());
        Ok(SyncOutcome::Created)
    }
}

#[tokio::test]
async fn test_missing_file_loads_initial_state() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);

    assert_eq!(store.load().await.unwrap(), TrackerState::initial());
    assert!(!store.path().exists());
}

#[tokio::test]
async fn test_persist_then_load() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    let state = TrackerState::new(tracks(1, 50), tracks(60, 65), 3).unwrap();

    store.persist(&state).await.unwrap();

    assert_eq!(store.load().await.unwrap(), state);
    let leftovers: Vec<_> = std::fs::read_dir(store.path().parent().unwrap())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(leftovers, vec!["tracker.json".to_string()]);
}

#[tokio::test]
async fn test_persisted_file_is_readable_json() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    let state = TrackerState::new(tracks(1, 2), tracks(3, 3), 2).unwrap();

    store.persist(&state).await.unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json["archivedIds"], serde_json::json!(["T1", "T2"]));
    assert_eq!(json["carryoverIds"], serde_json::json!(["T3"]));
    assert_eq!(json["batchNumber"], serde_json::json!(2));
    assert_eq!(json.as_object().unwrap().len(), 3);
}

#[tokio::test]
async fn test_persist_replaces_previous_state() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);

    store
        .persist(&TrackerState::new(tracks(1, 50), Vec::new(), 2).unwrap())
        .await
        .unwrap();
    let second = TrackerState::new(tracks(1, 100), Vec::new(), 3).unwrap();
    store.persist(&second).await.unwrap();

    assert_eq!(store.load().await.unwrap(), second);
}

#[tokio::test]
async fn test_unparsable_file_is_corruption() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"archivedIds": ["T1"], "carryoverIds": ["#).unwrap();

    let err = store.load().await.unwrap_err();

    assert!(matches!(err, BatchError::StateCorruption { .. }));
    // the broken file is left for the operator
    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        r#"{"archivedIds": ["T1"], "carryoverIds": ["#
    );
}

#[tokio::test]
async fn test_empty_file_is_corruption() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "").unwrap();

    assert!(matches!(
        store.load().await,
        Err(BatchError::StateCorruption { .. })
    ));
}

#[tokio::test]
async fn test_overlapping_ids_are_corruption() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(
        store.path(),
        r#"{"archivedIds": ["T1", "T2"], "carryoverIds": ["T2"], "batchNumber": 2}"#,
    )
    .unwrap();

    match store.load().await {
        Err(BatchError::StateCorruption { reason, .. }) => assert!(reason.contains("T2")),
        other => panic!("expected corruption, got {:?}", other),
    }
}

#[tokio::test]
async fn test_corrupt_state_blocks_run() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"batchNumber": 0}"#).unwrap();

    let sync = RecordingSync::default();
    let err = run_batch(&StaticSource(tracks(1, 50)), &sync, &store)
        .await
        .unwrap_err();

    assert!(matches!(err, BatchError::StateCorruption { .. }));
    assert!(sync.0.lock().unwrap().is_empty());
    assert_eq!(
        std::fs::read_to_string(store.path()).unwrap(),
        r#"{"batchNumber": 0}"#
    );
}

#[tokio::test]
async fn test_aborted_run_leaves_file_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    store
        .persist(&TrackerState::new(tracks(1, 50), tracks(51, 60), 2).unwrap())
        .await
        .unwrap();
    let before = std::fs::read(store.path()).unwrap();

    let sync = RecordingSync::default();
    let outcome = run_batch(&StaticSource(tracks(1, 99)), &sync, &store)
        .await
        .unwrap();

    assert!(matches!(outcome, RunOutcome::Aborted { available: 49, .. }));
    assert!(sync.0.lock().unwrap().is_empty());
    assert_eq!(std::fs::read(store.path()).unwrap(), before);
}

#[tokio::test]
async fn test_completed_run_commits_to_disk() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    let sync = RecordingSync::default();

    run_batch(&StaticSource(tracks(1, 50)), &sync, &store)
        .await
        .unwrap();

    let reloaded = manager(&dir).load().await.unwrap();
    assert_eq!(reloaded.batch_number(), 2);
    assert_eq!(reloaded.archived_ids().len(), 50);
    assert!(reloaded.carryover_ids().is_empty());
}

#[tokio::test]
async fn test_run_lock_excludes_second_holder() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);

    let lock = RunLock::acquire(store.lock_path()).await.unwrap();
    assert!(lock.path().exists());

    let err = RunLock::acquire(store.lock_path()).await.unwrap_err();
    assert!(matches!(err, BatchError::Locked { .. }));

    drop(lock);
    assert!(!store.lock_path().exists());

    let again = RunLock::acquire(store.lock_path()).await.unwrap();
    drop(again);
}

#[test]
fn test_lock_path_is_sibling_of_state_file() {
    let store = TrackerStateManager::new("/var/lib/likedcli/tracker.json".into());
    assert_eq!(
        store.lock_path(),
        std::path::PathBuf::from("/var/lib/likedcli/tracker.lock")
    );
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_lock_of_dead_process_is_reclaimed() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    // above the kernel's pid_max, so never a live process
    std::fs::write(store.lock_path(), "4999999").unwrap();

    let lock = RunLock::acquire(store.lock_path()).await.unwrap();

    assert_eq!(
        std::fs::read_to_string(lock.path()).unwrap(),
        std::process::id().to_string()
    );
}

#[tokio::test]
async fn test_lock_of_live_process_is_kept() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.lock_path(), std::process::id().to_string()).unwrap();

    let err = RunLock::acquire(store.lock_path()).await.unwrap_err();

    assert!(matches!(err, BatchError::Locked { .. }));
    assert!(store.lock_path().exists());
}

#[tokio::test]
async fn test_lock_without_pid_is_kept() {
    let dir = TempDir::new().unwrap();
    let store = manager(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.lock_path(), "").unwrap();

    assert!(matches!(
        RunLock::acquire(store.lock_path()).await,
        Err(BatchError::Locked { .. })
    ));
    assert_eq!(std::fs::read_to_string(store.lock_path()).unwrap(), "");
}
