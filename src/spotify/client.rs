use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tokio::{sync::Mutex, time::sleep};

use crate::{Res, config, management::TokenManager, warning};

/// Retries for 502 and short 429 responses before a request is given up.
const MAX_RETRIES: u32 = 5;
/// Longest `Retry-After` the client is willing to sleep through.
const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Authenticated handle on the Spotify Web API for one user.
pub struct SpotifyClient {
    http: Client,
    tokens: Mutex<TokenManager>,
    user_id: String,
    api_url: String,
}

impl SpotifyClient {
    /// Creates a client for `user_id` against `api_url`.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Token cache that hands out and refreshes access tokens
    /// * `user_id` - Spotify user that owns the generated playlists
    /// * `api_url` - Base URL of the Web API, a trailing `/` is ignored
    ///
    /// # Example
    ///
    /// ```
    /// let client = SpotifyClient::new(tokens, "alice".into(), "https://api.spotify.com/v1".into());
    /// let liked = client.liked_tracks().await?;
    /// ```
    pub fn new(tokens: TokenManager, user_id: String, api_url: String) -> Self {
        Self {
            http: Client::new(),
            tokens: Mutex::new(tokens),
            user_id,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Builds a client from the cached token and the configured user.
    ///
    /// # Errors
    ///
    /// Fails when no token has been cached yet (run `likedcli auth` first) or
    /// when `SPOTIFY_USER_ID` is not set.
    pub async fn from_cache() -> Res<Self> {
        let tokens = TokenManager::load()
            .await
            .map_err(|e| format!("Failed to load token. Please run likedcli auth\n Error: {e}"))?;
        Ok(Self::new(
            tokens,
            config::spotify_user()?,
            config::spotify_apiurl(),
        ))
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Joins an API path such as `/me/tracks?limit=50` onto the configured
    /// base URL. Pagination `next` links from Spotify are already absolute and
    /// are used as they are.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    async fn token(&self) -> Res<String> {
        let token = self.tokens.lock().await.get_valid_token().await?;
        Ok(token)
    }

    /// Sends a request built by `build`, retrying on 502 and on 429 responses
    /// whose `Retry-After` is short enough to wait for. Any other error status
    /// is returned as an error.
    ///
    /// `build` is called once per attempt with the HTTP client and a valid
    /// access token, so a token refreshed between attempts is picked up.
    ///
    /// # Retry Logic
    ///
    /// - `502 Bad Gateway`: wait ten seconds, at most [`MAX_RETRIES`] times
    /// - `429 Too Many Requests`: wait `Retry-After` seconds (default 1), give
    ///   up at once when the delay exceeds [`MAX_RETRY_AFTER_SECS`]
    pub(crate) async fn send<F>(&self, build: F) -> Res<Response>
    where
        F: Fn(&Client, &str) -> RequestBuilder,
    {
        let mut attempt = 0;

        loop {
            let token = self.token().await?;
            let response = build(&self.http, token.as_str()).send().await?;
            attempt += 1;

            match response.status() {
                StatusCode::BAD_GATEWAY if attempt <= MAX_RETRIES => {
                    sleep(Duration::from_secs(10)).await;
                }
                StatusCode::TOO_MANY_REQUESTS if attempt <= MAX_RETRIES => {
                    let retry_after = response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse::<u64>().ok())
                        .unwrap_or(1);
                    if retry_after > MAX_RETRY_AFTER_SECS {
                        warning!(
                            "Retry after has reached an abnormal high of {} seconds. Try again later.",
                            retry_after
                        );
                        return Err(
                            format!("rate limited by Spotify for {retry_after} seconds").into(),
                        );
                    }
                    sleep(Duration::from_secs(retry_after)).await;
                }
                _ => return Ok(response.error_for_status()?),
            }
        }
    }
}
