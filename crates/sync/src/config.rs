//! Sync engine configuration loaded from environment variables.

use std::time::Duration;

use soko_core::types::{ChannelRef, WarehouseRef};

/// Maximum simultaneously in-flight per-row sync tasks.
///
/// A hard cap balancing throughput against mutation-backend load;
/// unbounded concurrency degrades latency and error rates upstream.
pub const DEFAULT_MAX_IN_FLIGHT: usize = 5;

/// Per-remote-call timeout. An elapsed call fails its phase rather
/// than leaving the batch stuck.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 30;

/// Batches smaller than this do not surface a progress indicator.
pub const DEFAULT_PROGRESS_VISIBLE_MIN_ROWS: usize = 2;

/// Configuration for one editing session's sync engine.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Concurrency cap for per-row tasks (default: `5`).
    pub max_in_flight: usize,
    /// Timeout applied to each remote mutation call (default: `30`).
    pub call_timeout_secs: u64,
    /// Sales channel all price updates in this session apply to.
    pub channel: ChannelRef,
    /// Fallback stock location for rows whose variant has no existing
    /// stock record.
    pub default_warehouse: Option<WarehouseRef>,
    /// Minimum batch size for visible progress (default: `2`).
    pub progress_visible_min_rows: usize,
}

impl SyncConfig {
    /// Configuration with documented defaults for the given channel.
    pub fn new(channel: ChannelRef) -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            call_timeout_secs: DEFAULT_CALL_TIMEOUT_SECS,
            channel,
            default_warehouse: None,
            progress_visible_min_rows: DEFAULT_PROGRESS_VISIBLE_MIN_ROWS,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default    |
    /// |--------------------------|------------|
    /// | `SALES_CHANNEL_ID`       | (required) |
    /// | `DEFAULT_WAREHOUSE_ID`   | unset      |
    /// | `SYNC_MAX_IN_FLIGHT`     | `5`        |
    /// | `SYNC_CALL_TIMEOUT_SECS` | `30`       |
    pub fn from_env() -> Self {
        let channel = ChannelRef::new(
            std::env::var("SALES_CHANNEL_ID").expect("SALES_CHANNEL_ID must be set"),
        );

        let default_warehouse = std::env::var("DEFAULT_WAREHOUSE_ID")
            .ok()
            .filter(|s| !s.is_empty())
            .map(WarehouseRef::new);

        let max_in_flight: usize = std::env::var("SYNC_MAX_IN_FLIGHT")
            .unwrap_or_else(|_| DEFAULT_MAX_IN_FLIGHT.to_string())
            .parse()
            .expect("SYNC_MAX_IN_FLIGHT must be a valid usize");

        let call_timeout_secs: u64 = std::env::var("SYNC_CALL_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_CALL_TIMEOUT_SECS.to_string())
            .parse()
            .expect("SYNC_CALL_TIMEOUT_SECS must be a valid u64");

        Self {
            max_in_flight,
            call_timeout_secs,
            channel,
            default_warehouse,
            progress_visible_min_rows: DEFAULT_PROGRESS_VISIBLE_MIN_ROWS,
        }
    }

    /// The per-call timeout as a [`Duration`].
    pub fn call_timeout(&self) -> Duration {
        Duration::from_secs(self.call_timeout_secs)
    }
}
