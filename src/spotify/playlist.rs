use crate::{
    Res,
    batch::{PlaylistSync, SyncOutcome, TrackId},
    types::{
        CreatePlaylistRequest, CreatePlaylistResponse, GetUserPlaylistsResponse, Playlist,
        PlaylistItemsRequest,
    },
};

use super::SpotifyClient;

pub const PLAYLIST_DESCRIPTION: &str = "Auto-created by Liked Songs Manager";

/// Playlist item endpoints accept at most 100 URIs per request.
const ITEMS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    /// Finds a playlist owned by the current user by exact name.
    ///
    /// Walks every page of `/me/playlists`. That listing also contains
    /// playlists the user only follows; those are skipped even when their name
    /// matches, since their items cannot be replaced.
    ///
    /// # Arguments
    ///
    /// * `name` - Exact, case-sensitive playlist name
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Playlist))` - The first owned playlist with that name
    /// - `Ok(None)` - No owned playlist carries that name
    ///
    /// # Errors
    ///
    /// Fails on any request or decoding error after the client's retries.
    pub async fn find_playlist(&self, name: &str) -> Res<Option<Playlist>> {
        let mut next = Some(self.url("/me/playlists?limit=50"));

        while let Some(url) = next {
            let response = self
                .send(|http, token| http.get(&url).bearer_auth(token))
                .await?;
            let page = response.json::<GetUserPlaylistsResponse>().await?;
            if let Some(playlist) = owned_playlist_named(page.items, name, self.user_id()) {
                return Ok(Some(playlist));
            }
            next = page.next;
        }

        Ok(None)
    }

    /// Creates an empty private playlist for the configured user.
    ///
    /// The playlist is neither public nor collaborative and carries
    /// [`PLAYLIST_DESCRIPTION`], so generated playlists are easy to tell apart.
    ///
    /// # Arguments
    ///
    /// * `name` - Name of the new playlist
    ///
    /// # Errors
    ///
    /// Fails when Spotify rejects the request, for example when the token
    /// lacks the `playlist-modify-private` scope.
    ///
    /// # Example
    ///
    /// ```
    /// let playlist = client.create_playlist("Liked Songs #3 (All)").await?;
    /// client.add_tracks(&playlist.id, &tracks).await?;
    /// ```
    pub async fn create_playlist(&self, name: &str) -> Res<CreatePlaylistResponse> {
        let url = self.url(&format!("/users/{}/playlists", self.user_id()));
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            description: PLAYLIST_DESCRIPTION.to_string(),
            public: false,
            collaborative: false,
        };

        let response = self
            .send(|http, token| http.post(&url).bearer_auth(token).json(&body))
            .await?;
        Ok(response.json::<CreatePlaylistResponse>().await?)
    }

    /// Replaces all items of a playlist.
    ///
    /// The first 100 tracks replace the content in one `PUT`, the rest are
    /// appended in order through [`add_tracks`](Self::add_tracks). An empty
    /// list clears the playlist.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Spotify id of a playlist the user owns
    /// * `tracks` - New content, in playlist order
    ///
    /// # Errors
    ///
    /// A failure after the first request leaves the playlist partially
    /// filled; replacing it again restores the full content.
    pub async fn replace_tracks(&self, playlist_id: &str, tracks: &[TrackId]) -> Res<()> {
        let url = self.url(&format!("/playlists/{playlist_id}/tracks"));
        let split = tracks.len().min(ITEMS_PER_REQUEST);
        let body = items_request(&tracks[..split]);

        self.send(|http, token| http.put(&url).bearer_auth(token).json(&body))
            .await?;
        self.add_tracks(playlist_id, &tracks[split..]).await
    }

    /// Appends tracks to a playlist, 100 per request, keeping their order.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Spotify id of a playlist the user owns
    /// * `tracks` - Tracks to append; nothing is sent for an empty slice
    pub async fn add_tracks(&self, playlist_id: &str, tracks: &[TrackId]) -> Res<()> {
        let url = self.url(&format!("/playlists/{playlist_id}/tracks"));
        for chunk in tracks.chunks(ITEMS_PER_REQUEST) {
            let body = items_request(chunk);
            self.send(|http, token| http.post(&url).bearer_auth(token).json(&body))
                .await?;
        }
        Ok(())
    }

    /// Creates the playlist `name` with `tracks`, or replaces the contents of
    /// the existing playlist with that exact name.
    pub async fn create_or_replace_playlist(
        &self,
        name: &str,
        tracks: &[TrackId],
    ) -> Res<SyncOutcome> {
        match self.find_playlist(name).await? {
            Some(playlist) => {
                self.replace_tracks(&playlist.id, tracks).await?;
                Ok(SyncOutcome::Updated)
            }
            None => {
                let playlist = self.create_playlist(name).await?;
                self.add_tracks(&playlist.id, tracks).await?;
                Ok(SyncOutcome::Created)
            }
        }
    }
}

impl PlaylistSync for SpotifyClient {
    async fn sync_playlist(&self, name: &str, tracks: &[TrackId]) -> Res<SyncOutcome> {
        self.create_or_replace_playlist(name, tracks).await
    }
}

/// Picks the first playlist called `name` that is owned by `user_id` from one
/// page of `/me/playlists`.
pub fn owned_playlist_named(items: Vec<Playlist>, name: &str, user_id: &str) -> Option<Playlist> {
    items.into_iter().find(|p| {
        p.name == name
            && p.owner
                .as_ref()
                .is_some_and(|owner| owner.id == user_id)
    })
}

fn items_request(tracks: &[TrackId]) -> PlaylistItemsRequest {
    PlaylistItemsRequest {
        uris: tracks.iter().map(TrackId::to_uri).collect(),
    }
}
