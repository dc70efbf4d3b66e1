// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of [`crate::sinks::RelayMetricsSink`] using the
//! Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    register_gauge, register_int_counter, register_int_counter_vec, Gauge, IntCounter,
    IntCounterVec,
};

static BLOCKS_PROCESSED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static TASKS_EMITTED_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static COMMITS_SUCCEEDED_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static COMMIT_RETRIES_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static IDEMPOTENT_SKIPS_TOTAL: OnceCell<IntCounter> = OnceCell::new();
static SEED_ROTATIONS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static FATAL_ERRORS_TOTAL: OnceCell<IntCounterVec> = OnceCell::new();
static LAST_BLOCK_INDEX: OnceCell<Gauge> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

/// Helper macro to reduce boilerplate for getting a metric from OnceCell.
/// This will panic if `install()` has not been called, which is intentional
/// as it indicates a critical application setup error.
macro_rules! get_metric {
    ($metric:ident) => {
        $metric
            .get()
            .expect("Prometheus sink not initialized. Call telemetry::prometheus::install() first.")
    };
}

impl RelayMetricsSink for PrometheusSink {
    fn inc_blocks_processed(&self) {
        get_metric!(BLOCKS_PROCESSED_TOTAL).inc();
    }
    fn inc_tasks_emitted(&self, tag: &'static str) {
        get_metric!(TASKS_EMITTED_TOTAL).with_label_values(&[tag]).inc();
    }
    fn inc_commits_succeeded(&self) {
        get_metric!(COMMITS_SUCCEEDED_TOTAL).inc();
    }
    fn inc_commit_retries(&self) {
        get_metric!(COMMIT_RETRIES_TOTAL).inc();
    }
    fn inc_idempotent_skips(&self) {
        get_metric!(IDEMPOTENT_SKIPS_TOTAL).inc();
    }
    fn inc_seed_rotations(&self, chain: &'static str) {
        get_metric!(SEED_ROTATIONS_TOTAL).with_label_values(&[chain]).inc();
    }
    fn inc_fatal_errors(&self, kind: &'static str) {
        get_metric!(FATAL_ERRORS_TOTAL).with_label_values(&[kind]).inc();
    }
    fn set_last_block_index(&self, index: u32) {
        get_metric!(LAST_BLOCK_INDEX).set(index as f64);
    }
}

/// Initializes all Prometheus metrics collectors and returns a static reference to the sink.
/// This function must be called only once at application startup.
#[allow(clippy::expect_used)]
pub fn install() -> Result<&'static dyn RelayMetricsSink, prometheus::Error> {
    BLOCKS_PROCESSED_TOTAL
        .set(register_int_counter!(
            "relay_blocks_processed_total",
            "Total number of source blocks fully processed."
        )?)
        .expect("static already initialized");
    TASKS_EMITTED_TOTAL
        .set(register_int_counter_vec!(
            "relay_tasks_emitted_total",
            "Total tasks emitted by the decoder, by tag.",
            &["tag"]
        )?)
        .expect("static already initialized");
    COMMITS_SUCCEEDED_TOTAL
        .set(register_int_counter!(
            "relay_commits_succeeded_total",
            "Total destination transactions successfully committed."
        )?)
        .expect("static already initialized");
    COMMIT_RETRIES_TOTAL
        .set(register_int_counter!(
            "relay_commit_retries_total",
            "Total commit rounds that elapsed without full inclusion."
        )?)
        .expect("static already initialized");
    IDEMPOTENT_SKIPS_TOTAL
        .set(register_int_counter!(
            "relay_idempotent_skips_total",
            "Total destination responses recovered as idempotent skips."
        )?)
        .expect("static already initialized");
    SEED_ROTATIONS_TOTAL
        .set(register_int_counter_vec!(
            "relay_seed_rotations_total",
            "Total endpoint pool seed rotations, by chain.",
            &["chain"]
        )?)
        .expect("static already initialized");
    FATAL_ERRORS_TOTAL
        .set(register_int_counter_vec!(
            "relay_fatal_errors_total",
            "Total fatal errors that terminated the process, by kind.",
            &["kind"]
        )?)
        .expect("static already initialized");
    LAST_BLOCK_INDEX
        .set(register_gauge!(
            "relay_last_block_index",
            "The last source block index processed."
        )?)
        .expect("static already initialized");

    static SINK: PrometheusSink = PrometheusSink;
    Ok(&SINK)
}
