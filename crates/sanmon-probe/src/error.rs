//! Per-endpoint probe failures.

use std::time::Duration;
use thiserror::Error;

/// Failures talking to one management endpoint.
///
/// All variants are recoverable: the aggregator reacts by advancing to
/// the next configured endpoint for the same array.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("connection to {addr} failed: {reason}")]
    Connection { addr: String, reason: String },

    #[error("request to {addr} timed out after {}s", timeout.as_secs())]
    Timeout { addr: String, timeout: Duration },

    #[error("unexpected response from {addr}: {reason}")]
    Protocol { addr: String, reason: String },
}
