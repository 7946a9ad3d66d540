//! Bounded-parallelism scheduler for per-row sync tasks.
//!
//! Wraps a [`Semaphore`] and a [`JoinSet`]: every unit of work is
//! spawned, but a unit only starts running its body once it holds a
//! permit, so at most `max_in_flight` units make progress at a time.
//! The limiter joins all units before returning — it never
//! short-circuits on a unit's outcome, because units catch their own
//! failures and resolve to result records.

use std::future::Future;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Hard failure of the scheduler itself (a panicked or cancelled
/// task). Per-unit domain failures never surface here.
#[derive(Debug, Error)]
pub enum LimiterError {
    #[error("task join failure: {0}")]
    Join(String),
}

/// Runs a set of asynchronous units with a fixed concurrency ceiling.
pub struct ConcurrencyLimiter {
    permits: Arc<Semaphore>,
}

impl ConcurrencyLimiter {
    /// Create a limiter allowing `max_in_flight` concurrent units.
    ///
    /// The production value comes from
    /// [`SyncConfig::max_in_flight`](crate::config::SyncConfig);
    /// the constructor parameter exists so tests can tighten it.
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(max_in_flight)),
        }
    }

    /// Run every unit exactly once and collect all results.
    ///
    /// Completion order is unconstrained and not reflected in the
    /// returned order; callers correlate results by ids carried in the
    /// unit outputs. Resolves only after every unit has resolved.
    pub async fn run_all<T, F>(&self, units: Vec<F>) -> Result<Vec<T>, LimiterError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let mut set = JoinSet::new();
        for unit in units {
            let permits = Arc::clone(&self.permits);
            set.spawn(async move {
                // The semaphore is never closed, so acquisition only
                // fails on a scheduler bug; that panic surfaces as a
                // JoinError below.
                let _permit = permits
                    .acquire_owned()
                    .await
                    .expect("limiter semaphore closed");
                unit.await
            });
        }

        let mut results = Vec::with_capacity(set.len());
        while let Some(joined) = set.join_next().await {
            results.push(joined.map_err(|e| LimiterError::Join(e.to_string()))?);
        }
        Ok(results)
    }
}
