//! # Spotify Integration Module
//!
//! Thin client over the parts of the Spotify Web API likedcli needs. It serves
//! as the integration layer between the playlist logic and Spotify, handling
//! authentication, pagination, rate limiting and the chunking limits of the
//! individual endpoints.
//!
//! ## Architecture
//!
//! ```text
//! CLI commands, batch runner, playlist builders
//!          ↓
//! SpotifyClient (TrackSource + PlaylistSync)
//!     ├── tracks    liked songs, newest first
//!     ├── artists   genre lookup, 50 ids per request
//!     └── playlist  find by name, create, replace items
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! [`auth`] implements the OAuth 2.0 PKCE flow used by `likedcli auth` and the
//! token refresh used by [`crate::management::TokenManager`].
//!
//! ## Error Handling
//!
//! Every request goes through [`SpotifyClient`]'s retry loop: `502 Bad Gateway`
//! is retried after ten seconds and `429 Too Many Requests` is retried after the
//! `Retry-After` delay if that delay is at most two minutes. Other failures are
//! returned to the caller unchanged; the batch runner treats them as external
//! service failures and does not touch its state.

pub mod artists;
pub mod auth;
mod client;
pub mod playlist;
pub mod tracks;

pub use client::SpotifyClient;
