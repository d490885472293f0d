//! # API Module
//!
//! HTTP endpoints of the short-lived local server started by `likedcli auth`.
//!
//! - [`callback`] completes the Spotify OAuth 2.0 PKCE flow by exchanging the
//!   authorization code for a token.
//! - [`health`] reports status and version, handy to check that the configured
//!   `SERVER_ADDRESS` is reachable before authorizing.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use likedcli::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
