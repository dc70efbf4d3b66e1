// Path: crates/decoder/src/error.rs
//! Decoder errors. Every variant here is fatal: a
//! malformed notification from a trusted chain indicates a source-side
//! contract change or relayer misconfiguration, not a recoverable condition.

use thiserror::Error;

/// A malformed or unexpected event argument shape.
#[derive(Debug, Error)]
#[error("malformed arguments for event {event}: {reason}")]
pub struct DecodeError {
    /// The event name that failed to decode (`"OnDeposited"`, `"burn(address)"`, ...).
    pub event: &'static str,
    /// A human-readable description of the shape mismatch.
    pub reason: String,
}

impl DecodeError {
    /// Builds a decode error for `event` with `reason`.
    pub fn new(event: &'static str, reason: impl Into<String>) -> Self {
        Self { event, reason: reason.into() }
    }
}
