use chrono::NaiveDate;

use crate::{types::LikedTrack, utils};

use super::PlaylistDraft;

pub fn monthly_playlist_name(month: NaiveDate) -> String {
    format!("Liked Songs - {}", month.format("%B %Y"))
}

/// Tracks liked during the last full calendar month before `today`, oldest
/// first. `None` when nothing was liked in that month.
///
/// Days are taken in UTC, the timezone Spotify reports `added_at` in. Entries
/// with an unparsable timestamp are left out.
pub fn monthly_playlist(liked: &[LikedTrack], today: NaiveDate) -> Option<PlaylistDraft> {
    let (start, end) = utils::last_full_month(today);

    let mut tracks: Vec<_> = liked
        .iter()
        .filter(|t| {
            utils::parse_added_at(&t.added_at)
                .map(|added| (start..=end).contains(&added.date_naive()))
                .unwrap_or(false)
        })
        .map(|t| t.id.clone())
        .collect();

    if tracks.is_empty() {
        return None;
    }

    // liked songs come newest first
    tracks.reverse();
    Some(PlaylistDraft {
        name: monthly_playlist_name(end),
        tracks,
    })
}
