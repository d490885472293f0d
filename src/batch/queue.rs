use std::collections::{VecDeque, vec_deque};

use serde::{Deserialize, Serialize};

use super::{BATCH_SIZE, TrackId};

/// FIFO of tracks waiting for a Fresh batch.
///
/// New candidates are appended at the back, emitted tracks are taken from the
/// front, so the oldest carryover always leaves first. Persisted as a plain
/// JSON array in queue order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarryoverQueue(VecDeque<TrackId>);

impl CarryoverQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_back(&mut self, id: TrackId) {
        self.0.push_back(id);
    }

    pub fn pop_front(&mut self) -> Option<TrackId> {
        self.0.pop_front()
    }

    /// Takes up to `n` tracks from the front, oldest first.
    pub fn take_front(&mut self, n: usize) -> Vec<TrackId> {
        let n = n.min(self.0.len());
        self.0.drain(..n).collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.0.contains(id)
    }

    /// A queue holding a full batch or more after a run was never drained by
    /// the Fresh resolver, which only happens to states written elsewhere.
    pub fn exceeds_batch(&self) -> bool {
        self.0.len() >= BATCH_SIZE
    }

    pub fn iter(&self) -> vec_deque::Iter<'_, TrackId> {
        self.0.iter()
    }
}

impl FromIterator<TrackId> for CarryoverQueue {
    fn from_iter<I: IntoIterator<Item = TrackId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<TrackId> for CarryoverQueue {
    fn extend<I: IntoIterator<Item = TrackId>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a CarryoverQueue {
    type Item = &'a TrackId;
    type IntoIter = vec_deque::Iter<'a, TrackId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
