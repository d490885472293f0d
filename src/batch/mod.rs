//! # Batch Module
//!
//! Numbered batch playlists over the liked songs library.
//!
//! Every run takes the next fixed window of [`BATCH_SIZE`] liked tracks and
//! publishes it as `Liked Songs #<n> (All)`. Tracks of that window that never
//! appeared in an earlier Fresh playlist join a FIFO carryover queue; once the
//! queue holds a full batch, the oldest [`BATCH_SIZE`] entries are published as
//! `Liked Songs #<n> (Fresh)` and archived for good.
//!
//! ```text
//! load state -> fetch liked -> window -> sync All -> resolve Fresh -> sync Fresh -> persist
//!                                 |
//!                                 +-> undersized: abort, no side effects
//! ```
//!
//! The transition itself ([`plan_batch`]) is pure. Track retrieval, playlist
//! sync and persistence sit behind [`TrackSource`], [`PlaylistSync`] and
//! [`StateStore`], and [`run_batch`] orders them so that the state is only
//! committed after every playlist is published.

mod error;
mod fresh;
mod partition;
mod queue;
mod run;
mod state;
mod track;

pub use error::BatchError;
pub use fresh::{FreshResolution, fresh_candidates, resolve_fresh};
pub use partition::batch_window;
pub use queue::CarryoverQueue;
pub use run::{
    BatchPlan, FreshOutcome, PlaylistSync, RunOutcome, StateStore, SyncOutcome, TrackSource,
    plan_batch, run_batch,
};
pub use state::TrackerState;
pub use track::{TrackId, dedup_liked};

/// Tracks per batch, for both the All and the Fresh playlist.
pub const BATCH_SIZE: usize = 50;

pub fn all_playlist_name(batch_number: u32) -> String {
    format!("Liked Songs #{batch_number} (All)")
}

pub fn fresh_playlist_name(batch_number: u32) -> String {
    format!("Liked Songs #{batch_number} (Fresh)")
}
