// Path: crates/telemetry/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # Relay Telemetry
//!
//! Observability infrastructure for the relayer binaries: structured
//! logging initialization, a small Prometheus metrics endpoint, and an
//! abstract sink decoupling pipeline instrumentation from the backend.

/// A lightweight HTTP server for exposing `/metrics` and `/healthz` endpoints.
pub mod http;
/// The initialization routine for global structured logging.
pub mod init;
/// The concrete implementation of the metrics sink using the `prometheus` crate.
pub mod prometheus;
/// The abstract `RelayMetricsSink` trait defining the metrics contract.
pub mod sinks;

// Re-export the public helper function for easy access to the global sink.
pub use sinks::metrics;
