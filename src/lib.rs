//! Liked Songs Manager CLI Library
//!
//! This library reorganizes the liked songs of a Spotify account into derived
//! playlists. Its core is the numbered batch tracker, which publishes the
//! liked library in fixed windows of 50 tracks and keeps a separate "Fresh"
//! series of tracks that were never published before. Around it sit the
//! Spotify client, the local state managers and the one-shot monthly, recent
//! and genre playlists.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `batch` - Batch partitioning, fresh-set resolution and the run state machine
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Persisted tracker state, run lock and token cache
//! - `playlists` - Monthly, recent and genre playlist builders
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use likedcli::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> likedcli::Res<()> {
//!     config::load_env().await?;
//!     cli::batch(false).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod batch;
pub mod cli;
pub mod config;
pub mod management;
pub mod playlists;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias for operations whose errors are only reported, never matched.
///
/// Spotify requests, token handling and local file plumbing all funnel into
/// this boxed error. The batch core uses [`batch::BatchError`] instead, where
/// callers need to tell an informational skip from a failed run.
///
/// # Example
///
/// ```
/// use likedcli::Res;
///
/// async fn liked_count(client: &likedcli::spotify::SpotifyClient) -> Res<usize> {
///     Ok(client.liked_tracks().await?.len())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line with a blue "o".
///
/// # Arguments
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Found {} liked songs", liked.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green "✓" for a completed step, such as a
/// playlist that was created or updated.
///
/// # Example
///
/// ```
/// success!("Playlist {} {}.", name, outcome.as_str());
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red "!" line to stderr and exits with status 1.
///
/// Only for the command handlers: a scheduler running `likedcli` sees the
/// failure through the exit status. Library code returns errors instead.
///
/// # Arguments
///
/// Accepts the same arguments as `eprintln!`. The expansion has type `!`, so
/// it can end a `match` arm that otherwise yields a value.
///
/// # Example
///
/// ```
/// let client = match SpotifyClient::from_cache().await {
///     Ok(client) => client,
///     Err(e) => error!("{}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow "!" line to stderr for problems the run recovers from.
///
/// # Example
///
/// ```
/// warning!("Failed to cache refreshed token: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
