use crate::{error, playlists, spotify::SpotifyClient, types::LikedTrack};

use super::{connect, fetch_liked, publish};

pub async fn genre() {
    let client = connect().await;
    let liked = fetch_liked(&client).await;
    if let Err(e) = publish_genre(&client, &liked).await {
        error!("{}", e);
    }
}

pub(super) async fn publish_genre(client: &SpotifyClient, liked: &[LikedTrack]) -> crate::Res<()> {
    let artist_ids: Vec<String> = liked
        .iter()
        .filter_map(|t| t.primary_artist_id.clone())
        .collect();
    let artists = client
        .get_artists(&artist_ids)
        .await
        .map_err(|e| format!("Failed to look up artist genres: {e}"))?;

    publish(client, &playlists::genre_playlist(liked, &artists)).await
}
