//! Two-phase batch synchronization.
//!
//! For each dirty, validated row the orchestrator runs a price-update
//! phase and then a stock-update-or-create phase against the mutation
//! gateway, with bounded concurrency and a per-call timeout. Phase
//! failures never abort the batch: every row runs to completion and
//! resolves to a [`SaveResult`]. No automatic retry is performed —
//! failed rows stay dirty so the next user-initiated save re-submits
//! them.
//!
//! Per-row phases:
//!
//! 1. Price update for the row's variant on the session channel. Any
//!    failure fails the row immediately; the stock phase is skipped.
//! 2. Stock update at the effective warehouse (the row's, else the
//!    configured default; neither -> fail). A `NotFound` from the
//!    update means no stock record exists yet and triggers exactly one
//!    create with the same tuple; any other error fails the phase
//!    directly.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use soko_core::row::InventoryRow;
use soko_core::types::{ChannelRef, RowId, VariantRef, WarehouseRef};
use soko_gateway::{
    GatewayError, MutationGateway, PriceUpdateRequest, StockCreateRequest, StockUpdateRequest,
};

use crate::config::SyncConfig;
use crate::limiter::{ConcurrencyLimiter, LimiterError};
use crate::outcome::{BatchSummary, SaveResult};
use crate::progress::{BatchProgress, ProgressBus};

/// Hard failure of a batch as a whole.
///
/// Per-row phase failures are part of the [`BatchSummary`], never an
/// error; only a scheduling failure of the limiter itself surfaces
/// here.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("batch scheduling failed: {0}")]
    Scheduling(String),
}

impl From<LimiterError> for SyncError {
    fn from(err: LimiterError) -> Self {
        SyncError::Scheduling(err.to_string())
    }
}

/// Owned snapshot of one row's submission data.
///
/// Per-row tasks run on their own snapshots so the row slice is not
/// shared across tasks; outcomes are applied back by row id after the
/// join.
#[derive(Debug, Clone)]
struct RowSubmission {
    row_id: RowId,
    variant: VariantRef,
    /// Effective warehouse: the row's own, else the configured
    /// default. `None` fails the stock phase.
    warehouse: Option<WarehouseRef>,
    quantity: i64,
    cost_price: f64,
    selling_price: f64,
}

/// Drives two-phase synchronization of pre-screened row batches.
pub struct BatchSynchronizer {
    gateway: Arc<dyn MutationGateway>,
    config: SyncConfig,
    progress: Arc<ProgressBus>,
    limiter: ConcurrencyLimiter,
}

impl BatchSynchronizer {
    pub fn new(
        gateway: Arc<dyn MutationGateway>,
        config: SyncConfig,
        progress: Arc<ProgressBus>,
    ) -> Self {
        let limiter = ConcurrencyLimiter::new(config.max_in_flight);
        Self {
            gateway,
            config,
            progress,
            limiter,
        }
    }

    /// Synchronize a batch of dirty, validated rows.
    ///
    /// Assumes the save workflow already screened the batch
    /// ([`save_changes`](crate::save::save_changes) enforces the
    /// all-or-nothing validation gate); rows that are not submittable
    /// are skipped with a warning rather than submitted blind.
    ///
    /// Rows whose two-phase sync succeeded are marked synchronized
    /// (dirty and newly-added flags cleared); failed rows keep their
    /// dirty flag for retry. Publishes exactly one progress event per
    /// row, success or failure.
    pub async fn synchronize_batch(
        &self,
        rows: &mut [InventoryRow],
    ) -> Result<BatchSummary, SyncError> {
        let submissions = self.snapshot(rows);
        let total = submissions.len();
        let visible = total >= self.config.progress_visible_min_rows;
        let display_names: HashMap<RowId, String> = rows
            .iter()
            .map(|r| (r.id, r.display_name()))
            .collect();

        tracing::info!(total, max_in_flight = self.config.max_in_flight, "Batch sync started");

        let completed = Arc::new(AtomicUsize::new(0));
        let units: Vec<_> = submissions
            .into_iter()
            .map(|sub| {
                let gateway = Arc::clone(&self.gateway);
                let progress = Arc::clone(&self.progress);
                let completed = Arc::clone(&completed);
                let channel = self.config.channel.clone();
                let call_timeout = self.config.call_timeout();
                async move {
                    let result = sync_one_row(gateway, sub, channel, call_timeout).await;
                    // Serialized via the atomic: one increment and one
                    // progress event per row, regardless of outcome.
                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress.publish(BatchProgress {
                        total,
                        completed: done,
                        visible,
                    });
                    result
                }
            })
            .collect();

        let results = self.limiter.run_all(units).await?;

        for result in results.iter().filter(|r| r.succeeded) {
            if let Some(row) = rows.iter_mut().find(|r| r.id == result.row_id) {
                row.mark_synchronized();
            }
        }

        let summary = BatchSummary::from_results(&results, &display_names);
        tracing::info!(
            total = summary.total,
            succeeded = summary.succeeded_count,
            failed = summary.failed_count,
            "Batch sync finished",
        );
        Ok(summary)
    }

    /// Snapshot submittable rows, resolving each row's effective
    /// warehouse against the configured default.
    fn snapshot(&self, rows: &[InventoryRow]) -> Vec<RowSubmission> {
        rows.iter()
            .filter_map(|row| {
                let Some(binding) = &row.product else {
                    tracing::warn!(row_id = %row.id, "Skipping placeholder row in batch");
                    return None;
                };
                if !row.is_dirty {
                    tracing::warn!(row_id = %row.id, "Skipping clean row in batch");
                    return None;
                }
                Some(RowSubmission {
                    row_id: row.id,
                    variant: binding.variant.clone(),
                    warehouse: binding
                        .warehouse
                        .clone()
                        .or_else(|| self.config.default_warehouse.clone()),
                    quantity: row.quantity,
                    cost_price: row.cost_price,
                    selling_price: row.selling_price,
                })
            })
            .collect()
    }
}

/// Run both phases for one row, catching every failure into the
/// returned [`SaveResult`]. Never panics, never propagates.
async fn sync_one_row(
    gateway: Arc<dyn MutationGateway>,
    sub: RowSubmission,
    channel: ChannelRef,
    call_timeout: Duration,
) -> SaveResult {
    // Phase 1: price. A failure here short-circuits the row — the
    // stock phase is never attempted on a row whose price is wrong.
    let price_req =
        PriceUpdateRequest::new(sub.variant.clone(), channel, sub.selling_price, sub.cost_price);
    if let Err(e) = with_timeout(call_timeout, gateway.update_price(price_req)).await {
        tracing::warn!(row_id = %sub.row_id, error = %e, "Price phase failed");
        return SaveResult::failure(sub.row_id, vec![e.to_string()]);
    }

    // Phase 2: stock.
    let mut errors = Vec::new();
    match sub.warehouse {
        None => {
            tracing::warn!(row_id = %sub.row_id, "No warehouse available for stock phase");
            errors.push("no warehouse available".to_string());
        }
        Some(warehouse) => {
            let update_req = StockUpdateRequest {
                variant: sub.variant.clone(),
                warehouse,
                quantity: sub.quantity,
            };
            match with_timeout(call_timeout, gateway.update_stock(update_req.clone())).await {
                Ok(()) => {}
                Err(GatewayError::NotFound(_)) => {
                    // No stock record exists for this variant at the
                    // warehouse yet: create one with the same tuple.
                    tracing::debug!(row_id = %sub.row_id, "Stock record missing, creating");
                    let create_req = StockCreateRequest::from(update_req);
                    if let Err(e) = with_timeout(call_timeout, gateway.create_stock(create_req)).await
                    {
                        tracing::warn!(row_id = %sub.row_id, error = %e, "Stock create failed");
                        errors.push(e.to_string());
                    }
                }
                Err(e) => {
                    tracing::warn!(row_id = %sub.row_id, error = %e, "Stock update failed");
                    errors.push(e.to_string());
                }
            }
        }
    }

    if errors.is_empty() {
        SaveResult::success(sub.row_id)
    } else {
        SaveResult::failure(sub.row_id, errors)
    }
}

/// Wrap a gateway call in the per-call timeout; an elapsed timeout
/// fails the phase like a transport error instead of stalling the
/// batch.
async fn with_timeout<F>(limit: Duration, call: F) -> Result<(), GatewayError>
where
    F: Future<Output = Result<(), GatewayError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(GatewayError::Transport(format!(
            "timed out after {}s",
            limit.as_secs()
        ))),
    }
}
