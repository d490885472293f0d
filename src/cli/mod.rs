//! Command handlers behind the `likedcli` subcommands.
//!
//! Handlers report progress with the crate's status macros and end the
//! process through `error!` on fatal failures; the library modules they call
//! return errors instead.

mod auth;
mod batch;
mod genre;
mod monthly;
mod recent;
mod run;
mod state;

pub use auth::auth;
pub use batch::batch;
pub use genre::genre;
pub use monthly::monthly;
pub use recent::recent;
pub use run::run;
pub use state::state;

use crate::{
    error, info,
    playlists::PlaylistDraft,
    spotify::SpotifyClient,
    success,
    types::LikedTrack,
    utils,
};

async fn connect() -> SpotifyClient {
    match SpotifyClient::from_cache().await {
        Ok(client) => client,
        Err(e) => error!("{}", e),
    }
}

/// Liked tracks, newest first, without duplicates.
async fn fetch_liked(client: &SpotifyClient) -> Vec<LikedTrack> {
    let mut liked = match client.liked_tracks().await {
        Ok(liked) => liked,
        Err(e) => error!("Failed to fetch liked songs. Err: {}", e),
    };
    utils::remove_duplicate_tracks(&mut liked);
    info!("Found {} liked songs", liked.len());
    liked
}

async fn publish(client: &SpotifyClient, draft: &PlaylistDraft) -> crate::Res<()> {
    let outcome = client
        .create_or_replace_playlist(&draft.name, &draft.tracks)
        .await
        .map_err(|e| format!("Failed to sync playlist {}: {}", draft.name, e))?;
    success!(
        "Playlist {} {} with {} tracks.",
        draft.name,
        outcome.as_str(),
        draft.tracks.len()
    );
    Ok(())
}
