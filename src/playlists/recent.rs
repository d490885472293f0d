use crate::types::LikedTrack;

use super::PlaylistDraft;

pub const RECENT_PLAYLIST_NAME: &str = "Recent 50 Liked Songs";
pub const RECENT_PLAYLIST_SIZE: usize = 50;

/// The most recently liked tracks, newest first.
pub fn recent_playlist(liked: &[LikedTrack]) -> PlaylistDraft {
    PlaylistDraft {
        name: RECENT_PLAYLIST_NAME.to_string(),
        tracks: liked
            .iter()
            .take(RECENT_PLAYLIST_SIZE)
            .map(|t| t.id.clone())
            .collect(),
    }
}
