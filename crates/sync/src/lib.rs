//! Batched inventory synchronization engine.
//!
//! Reconciles locally-edited spreadsheet rows against the remote
//! pricing and stock-level subsystems: a bounded-concurrency
//! orchestrator runs a two-phase update per row (price, then
//! stock-with-create-fallback), aggregates partial failures into a
//! batch summary, and publishes live progress events for the UI.

pub mod config;
pub mod limiter;
pub mod orchestrator;
pub mod outcome;
pub mod progress;
pub mod save;

pub use config::SyncConfig;
pub use orchestrator::{BatchSynchronizer, SyncError};
pub use outcome::{BatchSummary, FailedItem, SaveResult};
pub use progress::{BatchProgress, ProgressBus, SyncEvent};
pub use save::{save_changes, SaveOutcome};
