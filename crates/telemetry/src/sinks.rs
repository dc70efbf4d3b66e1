// Path: crates/telemetry/src/sinks.rs
//! Defines an abstract trait for metrics reporting, decoupling the relay
//! pipeline from the backend (Prometheus, or a no-op for tests).

use once_cell::sync::OnceCell;

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `RelayMetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn RelayMetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured metrics sink, or a no-op
/// sink if none has been installed.
pub fn metrics() -> &'static dyn RelayMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Metrics the relay pipeline emits. One sink per process; both `minter`
/// and `withdrawer` binaries install the same concrete implementation.
pub trait RelayMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments the counter of source blocks fully processed.
    fn inc_blocks_processed(&self);
    /// Increments the counter of tasks emitted by the decoder, by tag
    /// (`"deposit"`, `"validators_designate"`, `"state_validators_change"`, `"burn"`).
    fn inc_tasks_emitted(&self, tag: &'static str);
    /// Increments the counter of destination transactions successfully committed.
    fn inc_commits_succeeded(&self);
    /// Increments the counter of commit rounds that elapsed without full inclusion.
    fn inc_commit_retries(&self);
    /// Increments the counter of destination responses recovered as idempotent skips.
    fn inc_idempotent_skips(&self);
    /// Increments the counter of endpoint-pool seed rotations.
    fn inc_seed_rotations(&self, chain: &'static str);
    /// Increments the counter of fatal errors that terminated the process.
    fn inc_fatal_errors(&self, kind: &'static str);
    /// Sets the gauge for the last source block index processed.
    fn set_last_block_index(&self, index: u32);
}

impl RelayMetricsSink for NopSink {
    fn inc_blocks_processed(&self) {}
    fn inc_tasks_emitted(&self, _tag: &'static str) {}
    fn inc_commits_succeeded(&self) {}
    fn inc_commit_retries(&self) {}
    fn inc_idempotent_skips(&self) {}
    fn inc_seed_rotations(&self, _chain: &'static str) {}
    fn inc_fatal_errors(&self, _kind: &'static str) {}
    fn set_last_block_index(&self, _index: u32) {}
}
