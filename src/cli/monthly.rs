use chrono::Utc;

use crate::{error, info, playlists, spotify::SpotifyClient, types::LikedTrack, utils};

use super::{connect, fetch_liked, publish};

pub async fn monthly() {
    let client = connect().await;
    let liked = fetch_liked(&client).await;
    if let Err(e) = publish_monthly(&client, &liked).await {
        error!("{}", e);
    }
}

pub(super) async fn publish_monthly(
    client: &SpotifyClient,
    liked: &[LikedTrack],
) -> crate::Res<()> {
    let today = Utc::now().date_naive();
    match playlists::monthly_playlist(liked, today) {
        Some(draft) => publish(client, &draft).await,
        None => {
            let (_, end) = utils::last_full_month(today);
            info!(
                "No songs liked in {}. Skipping monthly playlist.",
                end.format("%B %Y")
            );
            Ok(())
        }
    }
}
