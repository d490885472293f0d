use super::{BATCH_SIZE, BatchError, TrackId};

/// Returns the fixed window of the deduplicated liked list that makes up batch
/// `batch_number` (1-based).
///
/// The window always starts at `(batch_number - 1) * BATCH_SIZE`, however many
/// tracks have been liked since, so a batch keeps meaning the same slice. A
/// window with fewer than `BATCH_SIZE` tracks is never returned.
pub fn batch_window(liked: &[TrackId], batch_number: u32) -> Result<&[TrackId], BatchError> {
    let start = (batch_number.saturating_sub(1) as usize).saturating_mul(BATCH_SIZE);
    let available = liked.len().saturating_sub(start).min(BATCH_SIZE);

    if available < BATCH_SIZE {
        return Err(BatchError::InsufficientTracks {
            batch_number,
            available,
            required: BATCH_SIZE,
        });
    }

    Ok(&liked[start..start + BATCH_SIZE])
}
