//! Error taxonomy for remote mutation and search calls.

use thiserror::Error;

/// Outcome classification for one remote call.
///
/// `NotFound` is deliberately split out of `Business`: the stock
/// update/create fallback in the sync engine triggers only when the
/// backend reports that no stock record exists for the variant at the
/// target warehouse. Folding every business error into the fallback
/// would mask unrelated failures (permissions, price floors) and risk
/// creating duplicate stock records.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// The call itself could not complete: network failure, non-2xx
    /// status, or a malformed response body.
    #[error("transport error: {0}")]
    Transport(String),

    /// The call completed but the response payload carries an
    /// application-level error.
    #[error("{0}")]
    Business(String),

    /// The call completed and the backend reported that the target
    /// record does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Transport(err.to_string())
    }
}
