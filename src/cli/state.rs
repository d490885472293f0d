use tabled::Table;

use crate::{
    batch::{BATCH_SIZE, StateStore, all_playlist_name},
    error, info,
    management::TrackerStateManager,
    types::{CarryoverTableRow, TrackerStateTableRow},
    warning,
};

/// Shows the tracker state and the carryover queue in front-to-back order.
pub async fn state() {
    let store = TrackerStateManager::from_config();
    let state = match store.load().await {
        Ok(state) => state,
        Err(e) => error!("{}", e),
    };

    let rows = vec![
        TrackerStateTableRow {
            field: "state file".to_string(),
            value: store.path().display().to_string(),
        },
        TrackerStateTableRow {
            field: "next batch".to_string(),
            value: all_playlist_name(state.batch_number()),
        },
        TrackerStateTableRow {
            field: "archived tracks".to_string(),
            value: state.archived_ids().len().to_string(),
        },
        TrackerStateTableRow {
            field: "carryover tracks".to_string(),
            value: state.carryover_ids().len().to_string(),
        },
    ];
    println!("{}", Table::new(rows));

    if state.carryover_ids().is_empty() {
        info!("Carryover queue is empty.");
        return;
    }

    let carryover: Vec<CarryoverTableRow> = state
        .carryover_ids()
        .iter()
        .enumerate()
        .map(|(i, id)| CarryoverTableRow {
            position: i + 1,
            track: id.to_string(),
        })
        .collect();
    println!("{}", Table::new(carryover));

    if state.carryover_ids().exceeds_batch() {
        warning!(
            "Carryover queue holds {} tracks, at least one full batch of {}.",
            state.carryover_ids().len(),
            BATCH_SIZE
        );
    }
}
