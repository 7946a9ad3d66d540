//! The save-changes workflow.
//!
//! Screens every dirty row against the local validation rules before
//! anything leaves the process. The gate is all-or-nothing at the
//! batch level: one invalid row blocks the entire save, including the
//! rows that individually passed, and zero network calls are issued.

use soko_core::row::InventoryRow;
use soko_core::validate::screen_batch;

use crate::orchestrator::{BatchSynchronizer, SyncError};
use crate::outcome::BatchSummary;

/// Result of one save attempt.
#[derive(Debug)]
pub enum SaveOutcome {
    /// No row was dirty and product-bound; nothing was submitted.
    NothingToSave,
    /// Validation rejected the batch; violating rows carry their
    /// `validation_errors` and no network call was made.
    Rejected {
        /// Number of rows that failed validation.
        invalid_rows: usize,
    },
    /// The batch was submitted; the summary carries per-row outcomes.
    Completed(BatchSummary),
}

/// Validate and, if the whole batch is clean, synchronize it.
///
/// Successful rows come back with dirty/newly-added flags cleared;
/// failed and rejected rows stay dirty so a later save retries them.
pub async fn save_changes(
    synchronizer: &BatchSynchronizer,
    rows: &mut Vec<InventoryRow>,
) -> Result<SaveOutcome, SyncError> {
    if !rows.iter().any(InventoryRow::is_submittable) {
        return Ok(SaveOutcome::NothingToSave);
    }

    if !screen_batch(rows) {
        let invalid_rows = rows
            .iter()
            .filter(|r| !r.validation_errors.is_empty())
            .count();
        tracing::info!(invalid_rows, "Save rejected by validation gate");
        return Ok(SaveOutcome::Rejected { invalid_rows });
    }

    // Extract the batch, sync it, and write the updated rows back by
    // id so non-batch rows (placeholders, clean rows) are untouched.
    let mut batch: Vec<InventoryRow> = rows
        .iter()
        .filter(|r| r.is_submittable())
        .cloned()
        .collect();
    let summary = synchronizer.synchronize_batch(&mut batch).await?;

    for updated in batch {
        if let Some(slot) = rows.iter_mut().find(|r| r.id == updated.id) {
            *slot = updated;
        }
    }

    Ok(SaveOutcome::Completed(summary))
}
