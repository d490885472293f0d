use crate::{error, playlists, spotify::SpotifyClient, types::LikedTrack};

use super::{connect, fetch_liked, publish};

pub async fn recent() {
    let client = connect().await;
    let liked = fetch_liked(&client).await;
    if let Err(e) = publish_recent(&client, &liked).await {
        error!("{}", e);
    }
}

pub(super) async fn publish_recent(client: &SpotifyClient, liked: &[LikedTrack]) -> crate::Res<()> {
    publish(client, &playlists::recent_playlist(liked)).await
}
