// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # Relay API
//!
//! Narrow `async_trait` capability interfaces for the two chains the
//! relayer talks to. Concrete transports (`relay-endpoint`) and the relay
//! pipeline depend on these traits rather than on each other directly, so
//! tests can substitute a scripted mock pool.

/// RPC-shape request/response types shared by both chain interfaces.
pub mod common;
/// The RPC error taxonomy.
pub mod error;
/// The main (NEO-style) chain's RPC capability interface.
pub mod main_chain;
/// The side (EVM-compatible) chain's RPC capability interface.
pub mod side_chain;

pub use common::{EvmCallRequest, InclusionStatus, InvokeResult, Signer, WitnessScope};
pub use error::RpcError;
pub use main_chain::MainChainRpc;
pub use side_chain::SideChainRpc;
