// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Relay Types
//!
//! Foundational data structures shared by every crate in the relayer
//! workspace: source blocks and headers, application logs and log records,
//! decoded tasks, state roots, well-known constants, and the JSON relayer
//! configuration.
//!
//! As the base crate, `relay-types` has minimal dependencies and is a
//! dependency of almost every other crate in the workspace.

/// Well-known constants shared by every component.
pub mod constants;
/// `RelayerConfig`: the JSON configuration file loaded at startup.
pub mod config;
/// Source block headers, blocks, and the `is_joint` rule.
pub mod block;
/// Application logs, executions, notifications, and typed stack items.
pub mod notification;
/// Side-chain log records and transaction receipts.
pub mod log_record;
/// Decoded tasks and task batches.
pub mod task;
/// State roots and the "verified" predicate.
pub mod state_root;
/// A prelude containing commonly used extension traits.
pub mod prelude;

pub use block::{is_joint, BlockHeader, SourceBlock};
pub use config::RelayerConfig;
pub use log_record::{LogRecord, Receipt};
pub use notification::{ApplicationLog, Execution, NotificationEvent, StackItem, Trigger, VmState};
pub use state_root::StateRoot;
pub use task::{Task, TaskBatch};
