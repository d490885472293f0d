use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

/// Opaque identifier of a Spotify track.
///
/// No structure is assumed beyond equality; the batching core only compares
/// and stores ids, it never looks inside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackId(String);

impl TrackId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Playlist endpoints take `spotify:track:<id>` URIs rather than bare ids.
    pub fn to_uri(&self) -> String {
        format!("spotify:track:{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TrackId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Removes repeated ids, keeping the first (newest) occurrence of each.
///
/// Pagination over a library that changes while it is read can return the same
/// track on two pages. Survivors keep their relative order.
pub fn dedup_liked(liked: impl IntoIterator<Item = TrackId>) -> Vec<TrackId> {
    let mut seen = HashSet::new();
    liked
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect()
}
