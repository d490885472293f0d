use std::collections::HashMap;

use indicatif::ProgressBar;

use crate::{
    Res,
    types::{Artist, GetSeveralArtistsResponse},
    utils,
};

use super::SpotifyClient;

/// `/artists?ids=` accepts at most 50 ids per request.
const ARTISTS_PER_REQUEST: usize = 50;

impl SpotifyClient {
    /// Looks up the given artists, 50 per request, and returns them keyed by id.
    ///
    /// Ids are deduplicated first, so a library with many tracks by the same
    /// artist costs one lookup per artist. Ids Spotify does not know are
    /// missing from the result.
    ///
    /// # Arguments
    ///
    /// * `artist_ids` - Spotify artist ids, duplicates allowed
    ///
    /// # Errors
    ///
    /// Fails on the first chunk that cannot be fetched or decoded.
    pub async fn get_artists(&self, artist_ids: &[String]) -> Res<HashMap<String, Artist>> {
        let mut unique: Vec<&str> = artist_ids.iter().map(String::as_str).collect();
        unique.sort_unstable();
        unique.dedup();

        let pb = utils::spinner(format!("Resolving {} artists...", unique.len()));
        let result = self.fetch_artist_chunks(&unique, &pb).await;
        pb.finish_and_clear();
        result
    }

    async fn fetch_artist_chunks(
        &self,
        unique: &[&str],
        pb: &ProgressBar,
    ) -> Res<HashMap<String, Artist>> {
        let mut artists = HashMap::with_capacity(unique.len());

        for chunk in unique.chunks(ARTISTS_PER_REQUEST) {
            let url = self.url(&format!("/artists?ids={}", chunk.join(",")));
            let response = self
                .send(|http, token| http.get(&url).bearer_auth(token))
                .await?;
            let res = response.json::<GetSeveralArtistsResponse>().await?;
            artists.extend(res.artists.into_iter().flatten().map(|a| (a.id.clone(), a)));
            pb.set_message(format!(
                "Resolved {} of {} artists...",
                artists.len(),
                unique.len()
            ));
        }

        Ok(artists)
    }
}
