use std::{collections::HashSet, time::Duration};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::{batch::TrackId, types::LikedTrack};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Drops repeated liked tracks, keeping the first (newest) entry of each id.
pub fn remove_duplicate_tracks(tracks: &mut Vec<LikedTrack>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

pub fn track_ids(tracks: &[LikedTrack]) -> Vec<TrackId> {
    tracks.iter().map(|t| t.id.clone()).collect()
}

pub fn parse_added_at(added_at: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(added_at)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// First and last day of the calendar month before `today`.
pub fn last_full_month(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first_of_this_month = today.with_day(1).unwrap_or(today);
    let last_month_end = first_of_this_month.pred_opt().unwrap_or(first_of_this_month);
    let last_month_start = last_month_end.with_day(1).unwrap_or(last_month_end);
    (last_month_start, last_month_end)
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
