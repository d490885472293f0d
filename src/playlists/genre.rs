use std::collections::{BTreeMap, HashMap};

use crate::{
    batch::TrackId,
    types::{Artist, LikedTrack},
};

use super::PlaylistDraft;

pub const GENRE_PLAYLIST_NAME: &str = "All Liked Songs by Genre";
pub const UNKNOWN_GENRE: &str = "Unknown";

/// First genre of the track's first artist, or [`UNKNOWN_GENRE`].
pub fn primary_genre<'a>(track: &LikedTrack, artists: &'a HashMap<String, Artist>) -> &'a str {
    track
        .primary_artist_id
        .as_ref()
        .and_then(|id| artists.get(id))
        .and_then(|artist| artist.genres.first())
        .map_or(UNKNOWN_GENRE, String::as_str)
}

/// The whole library grouped by primary genre.
///
/// Genres are ordered alphabetically; inside a genre tracks keep their liked
/// order, newest first.
pub fn genre_playlist(liked: &[LikedTrack], artists: &HashMap<String, Artist>) -> PlaylistDraft {
    let mut by_genre: BTreeMap<&str, Vec<TrackId>> = BTreeMap::new();
    for track in liked {
        by_genre
            .entry(primary_genre(track, artists))
            .or_default()
            .push(track.id.clone());
    }

    PlaylistDraft {
        name: GENRE_PLAYLIST_NAME.to_string(),
        tracks: by_genre.into_values().flatten().collect(),
    }
}
