use std::{
    collections::{BTreeSet, HashSet},
    num::NonZeroU32,
};

use serde::{Deserialize, Serialize};

use super::{CarryoverQueue, TrackId};

/// Bookkeeping carried from one batch run to the next.
///
/// Serialized as a JSON object with exactly three fields, `archivedIds`,
/// `carryoverIds` and `batchNumber`. Archived ids are kept in a sorted set so
/// the file diffs cleanly between runs.
///
/// Invariants, checked by [`TrackerState::validate`]:
/// - `batch_number >= 1` (enforced by the type)
/// - no track is queued twice
/// - archived and carryover ids are disjoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TrackerState {
    archived_ids: BTreeSet<TrackId>,
    carryover_ids: CarryoverQueue,
    batch_number: NonZeroU32,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            archived_ids: BTreeSet::new(),
            carryover_ids: CarryoverQueue::new(),
            batch_number: NonZeroU32::MIN,
        }
    }
}

impl TrackerState {
    /// State of a first run: batch 1, nothing archived, nothing queued.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Builds a state from its parts, rejecting anything that breaks the invariants.
    pub fn new(
        archived_ids: impl IntoIterator<Item = TrackId>,
        carryover_ids: impl IntoIterator<Item = TrackId>,
        batch_number: u32,
    ) -> Result<Self, String> {
        let batch_number = NonZeroU32::new(batch_number)
            .ok_or_else(|| "batchNumber must be at least 1".to_string())?;
        let state = Self {
            archived_ids: archived_ids.into_iter().collect(),
            carryover_ids: carryover_ids.into_iter().collect(),
            batch_number,
        };
        state.validate()?;
        Ok(state)
    }

    pub fn validate(&self) -> Result<(), String> {
        let mut queued = HashSet::with_capacity(self.carryover_ids.len());
        for id in &self.carryover_ids {
            if !queued.insert(id) {
                return Err(format!("track {id} is queued more than once in carryoverIds"));
            }
            if self.archived_ids.contains(id) {
                return Err(format!(
                    "track {id} is both archived and queued for carryover"
                ));
            }
        }
        Ok(())
    }

    pub fn archived_ids(&self) -> &BTreeSet<TrackId> {
        &self.archived_ids
    }

    pub fn carryover_ids(&self) -> &CarryoverQueue {
        &self.carryover_ids
    }

    pub fn batch_number(&self) -> u32 {
        self.batch_number.get()
    }

    pub fn is_archived(&self, id: &TrackId) -> bool {
        self.archived_ids.contains(id)
    }

    /// Successor state after a completed run: archive the emitted Fresh tracks,
    /// replace the carryover queue and move on to the next batch.
    pub(crate) fn advance(&self, emitted: &[TrackId], carryover_ids: CarryoverQueue) -> Self {
        let mut archived_ids = self.archived_ids.clone();
        archived_ids.extend(emitted.iter().cloned());
        Self {
            archived_ids,
            carryover_ids,
            batch_number: self.batch_number.saturating_add(1),
        }
    }
}
