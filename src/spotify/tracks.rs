use indicatif::ProgressBar;

use crate::{
    Res,
    batch::{TrackId, TrackSource, dedup_liked},
    types::{LikedTrack, SavedTracksResponse},
    utils,
};

use super::SpotifyClient;

/// Page size of `/me/tracks`; 50 is the maximum Spotify allows.
const PAGE_SIZE: u32 = 50;

impl SpotifyClient {
    /// Retrieves every liked track, newest first.
    ///
    /// Follows the `next` links of `/me/tracks` until the library is exhausted.
    /// Entries without a track or without a track id (local files) are
    /// skipped. Duplicates caused by the library changing between pages are
    /// kept here and removed by the callers that care about them.
    ///
    /// A spinner reports progress and is cleared again on success and on
    /// failure.
    ///
    /// # Errors
    ///
    /// Fails on the first page that cannot be fetched or decoded.
    ///
    /// # Example
    ///
    /// ```
    /// let liked = client.liked_tracks().await?;
    /// info!("Found {} liked songs", liked.len());
    /// ```
    pub async fn liked_tracks(&self) -> Res<Vec<LikedTrack>> {
        let pb = utils::spinner("Fetching liked songs...");
        let result = self.fetch_liked_pages(&pb).await;
        pb.finish_and_clear();
        result
    }

    async fn fetch_liked_pages(&self, pb: &ProgressBar) -> Res<Vec<LikedTrack>> {
        let mut liked: Vec<LikedTrack> = Vec::new();
        let mut next = Some(self.url(&format!("/me/tracks?limit={PAGE_SIZE}&offset=0")));

        while let Some(url) = next {
            let response = self
                .send(|http, token| http.get(&url).bearer_auth(token))
                .await?;
            let page = response.json::<SavedTracksResponse>().await?;
            if page.items.is_empty() {
                break;
            }

            liked.extend(page.items.into_iter().filter_map(|item| {
                let track = item.track?;
                let id = track.id?;
                Some(LikedTrack {
                    id: TrackId::new(id),
                    added_at: item.added_at,
                    primary_artist_id: track.artists.into_iter().next().and_then(|a| a.id),
                })
            }));

            pb.set_message(match page.total {
                Some(total) => format!("Fetched {} of {} liked songs...", liked.len(), total),
                None => format!("Fetched {} liked songs...", liked.len()),
            });
            next = page.next;
        }

        Ok(liked)
    }
}

impl TrackSource for SpotifyClient {
    async fn fetch_liked_tracks(&self) -> Res<Vec<TrackId>> {
        let liked = self.liked_tracks().await?;
        Ok(dedup_liked(liked.into_iter().map(|t| t.id)))
    }
}
