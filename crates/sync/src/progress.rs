//! Live progress reporting for one save invocation.
//!
//! The orchestrator publishes one [`SyncEvent`] per completed row
//! through a broadcast [`ProgressBus`]; the UI layer subscribes and
//! renders however it likes. This keeps toast/progress side effects
//! out of the sync core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Snapshot of a batch's completion state.
///
/// Transient: recomputed per save invocation and discarded afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// Rows in this batch.
    pub total: usize,
    /// Rows finished so far, success or failure.
    pub completed: usize,
    /// Whether the UI should surface a progress indicator for this
    /// batch (small batches finish before one is worth drawing).
    pub visible: bool,
}

/// A progress notification published on the bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncEvent {
    pub progress: BatchProgress,
    /// When the event was published (UTC).
    pub timestamp: DateTime<Utc>,
}

/// In-process fan-out hub for sync progress events.
///
/// Wraps a [`broadcast::Sender`] so any number of subscribers can
/// independently observe every published event. Shared via
/// `Arc<ProgressBus>` between the orchestrator and the UI layer.
pub struct ProgressBus {
    sender: broadcast::Sender<SyncEvent>,
}

impl ProgressBus {
    /// Create a bus with a specific channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a progress snapshot to all current subscribers.
    ///
    /// With zero subscribers the event is silently dropped; progress
    /// is advisory and never worth failing a save over.
    pub fn publish(&self, progress: BatchProgress) {
        let event = SyncEvent {
            progress,
            timestamp: Utc::now(),
        };
        let _ = self.sender.send(event);
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.sender.subscribe()
    }
}

impl Default for ProgressBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
