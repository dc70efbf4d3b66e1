// Path: crates/endpoint/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)
)]

//! # Relay Endpoint
//!
//! The endpoint pool client: a seed-rotating, retrying JSON-RPC
//! transport, wrapped in concrete [`relay_api::MainChainRpc`] and
//! [`relay_api::SideChainRpc`] implementations.

/// The generic seed-rotating pool.
pub mod pool;
/// The single-seed JSON-RPC 2.0 transport.
pub mod transport;
/// `MainChainRpc` implemented over a pool of main-chain seeds.
pub mod main_chain_client;
/// `SideChainRpc` implemented over a pool of side-chain seeds.
pub mod side_chain_client;

pub use main_chain_client::MainChainPool;
pub use pool::Pool;
pub use side_chain_client::SideChainPool;
pub use transport::JsonRpcTransport;
