use crate::{
    Res,
    batch::{TrackId, TrackSource},
    error, info,
    management::TrackerStateManager,
    utils, warning,
};

use super::{
    batch::{report, report_partial, run_locked},
    connect, fetch_liked,
    genre::publish_genre,
    monthly::publish_monthly,
    recent::publish_recent,
};

/// Liked tracks fetched once and shared by every playlist of a run.
struct FetchedLikes(Vec<TrackId>);

impl TrackSource for FetchedLikes {
    async fn fetch_liked_tracks(&self) -> Res<Vec<TrackId>> {
        Ok(self.0.clone())
    }
}

/// Builds every playlist from a single fetch of the library: monthly, recent
/// and genre first, then the next batch. A failing one-shot playlist does not
/// stop the others, but the run exits with an error at the end.
pub async fn run(skip_batch: bool) {
    let client = connect().await;
    let liked = fetch_liked(&client).await;
    let mut failures = 0;

    for result in [
        publish_monthly(&client, &liked).await,
        publish_recent(&client, &liked).await,
        publish_genre(&client, &liked).await,
    ] {
        if let Err(e) = result {
            warning!("{}", e);
            failures += 1;
        }
    }

    if skip_batch {
        info!("Skipping batch playlists.");
    } else {
        let store = TrackerStateManager::from_config();
        let source = FetchedLikes(utils::track_ids(&liked));
        match run_locked(&source, &client, &store).await {
            Ok(outcome) => report(&outcome),
            Err(e) => {
                report_partial(&e);
                warning!("Batch run failed, tracker state left unchanged. Err: {}", e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        error!("{} playlist step(s) failed.", failures);
    }
}
