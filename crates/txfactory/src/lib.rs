// Path: crates/txfactory/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)
)]

//! # Relay Transaction Factory
//!
//! The transaction factory: builds signed destination-chain
//! transactions for the three operation shapes the relay pipeline drives
//! (header sync, state-root sync, per-task state sync), recognising
//! "already-applied" destination responses and returning `None` in their
//! place so the pipeline can skip committing.

/// EVM ABI call-data encoding for the side-chain bridge contract.
pub mod abi;
/// NEO-style compact-integer codec shared by the canonical serialisations.
pub mod compact;
/// Legacy EIP-155 transaction construction (minter destination).
pub mod evm;
/// The shared transaction-factory error type.
pub mod error;
/// Canonical header and state-root serialisation.
pub mod header_codec;
/// NEO invocation-transaction construction (withdrawer destination).
pub mod neo;
/// Task-to-method-and-key routing.
pub mod task_route;
/// The `TxFactory` capability interface.
pub mod trait_def;

pub use error::TxFactoryError;
pub use evm::EvmTxBuilder;
pub use neo::NeoTxBuilder;
pub use task_route::{route, TaskRoute};
pub use trait_def::TxFactory;
