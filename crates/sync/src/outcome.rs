//! Per-row outcomes and their aggregation into a batch summary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use soko_core::types::RowId;

/// Outcome of one row's two-phase synchronization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResult {
    pub row_id: RowId,
    /// True only if BOTH the price and stock phases succeeded.
    pub succeeded: bool,
    /// Phase failure messages, in the order the phases ran.
    pub errors: Vec<String>,
}

impl SaveResult {
    pub fn success(row_id: RowId) -> Self {
        Self {
            row_id,
            succeeded: true,
            errors: Vec::new(),
        }
    }

    pub fn failure(row_id: RowId, errors: Vec<String>) -> Self {
        Self {
            row_id,
            succeeded: false,
            errors,
        }
    }

    /// The row's failure messages joined for display.
    pub fn error_text(&self) -> String {
        self.errors.join(", ")
    }
}

/// One failed row as presented to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedItem {
    /// `"<product> - <variant>"` label.
    pub display_name: String,
    pub error_text: String,
}

/// Aggregated outcome of one save invocation. Handed to the UI for
/// display and then discarded; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded_count: usize,
    pub failed_count: usize,
    pub failed_items: Vec<FailedItem>,
}

impl BatchSummary {
    /// Partition per-row results by their `succeeded` flag.
    ///
    /// `display_names` maps row ids to their labels; a failed row
    /// missing from the map (should not happen) falls back to the row
    /// id itself.
    pub fn from_results(results: &[SaveResult], display_names: &HashMap<RowId, String>) -> Self {
        let total = results.len();
        let succeeded_count = results.iter().filter(|r| r.succeeded).count();
        let failed_items: Vec<FailedItem> = results
            .iter()
            .filter(|r| !r.succeeded)
            .map(|r| FailedItem {
                display_name: display_names
                    .get(&r.row_id)
                    .cloned()
                    .unwrap_or_else(|| r.row_id.to_string()),
                error_text: r.error_text(),
            })
            .collect();

        Self {
            total,
            succeeded_count,
            failed_count: total - succeeded_count,
            failed_items,
        }
    }

    /// Whether every row in the batch synchronized.
    pub fn all_succeeded(&self) -> bool {
        self.failed_count == 0
    }
}
