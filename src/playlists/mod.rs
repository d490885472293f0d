//! One-shot playlists derived from the whole liked library.
//!
//! Unlike the numbered batches these keep no state: every run recomputes them
//! from the current library and replaces the playlist of the same name.

mod genre;
mod monthly;
mod recent;

pub use genre::{GENRE_PLAYLIST_NAME, UNKNOWN_GENRE, genre_playlist, primary_genre};
pub use monthly::{monthly_playlist, monthly_playlist_name};
pub use recent::{RECENT_PLAYLIST_NAME, RECENT_PLAYLIST_SIZE, recent_playlist};

use crate::batch::TrackId;

/// A playlist ready to be synced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistDraft {
    pub name: String,
    pub tracks: Vec<TrackId>,
}
