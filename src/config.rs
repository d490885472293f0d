//! Configuration management for likedcli.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, the OAuth callback server and
//! the location of the batch tracker state.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

const DEFAULT_SCOPE: &str = "user-library-read playlist-read-private playlist-modify-private";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `likedcli/.env` inside the platform-specific
/// local data directory. Variables already present in the process environment
/// are not overridden, so a scheduler can inject its own values.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/likedcli/.env`
/// - macOS: `~/Library/Application Support/likedcli/.env`
/// - Windows: `%LOCALAPPDATA%/likedcli/.env`
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed. A missing `.env` file is not an error.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Root of everything likedcli stores locally.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("likedcli");
    path
}

/// Location of the batch tracker state.
///
/// Honors `LIKEDCLI_STATE_FILE` so several libraries or test setups can keep
/// separate trackers; defaults to `state/tracker.json` in the data directory.
pub fn tracker_state_path() -> PathBuf {
    match env::var("LIKEDCLI_STATE_FILE") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => data_dir().join("state/tracker.json"),
    }
}

/// Location of the cached OAuth token.
pub fn token_path() -> PathBuf {
    data_dir().join("cache/token.json")
}

/// Returns the server address for the local OAuth callback server,
/// e.g. `127.0.0.1:8080`.
pub fn server_addr() -> Result<String, String> {
    required("SERVER_ADDRESS")
}

/// Returns the Spotify user ID that owns the generated playlists.
pub fn spotify_user() -> Result<String, String> {
    required("SPOTIFY_USER_ID")
}

/// Returns the client ID obtained when registering the application with
/// Spotify's developer platform.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the OAuth redirect URI. This must match the redirect URI registered
/// in the Spotify application settings, e.g. `http://127.0.0.1:8080/callback`.
pub fn spotify_redirect_uri() -> Result<String, String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the OAuth scope. Reading the library and private playlists and
/// modifying private playlists is all likedcli needs.
pub fn spotify_scope() -> String {
    with_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    with_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    with_default("SPOTIFY_API_URL", DEFAULT_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    with_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

fn required(name: &str) -> Result<String, String> {
    env::var(name).map_err(|_| format!("{name} must be set"))
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
