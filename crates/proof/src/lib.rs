// Path: crates/proof/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)
)]

//! # Relay Proof
//!
//! The proof builder: Merkle transaction-inclusion proofs over
//! source-block transaction hashes, and a thin wrapper over each chain's
//! `get_proof` RPC for MPT state-inclusion proofs.

/// The shared proof error type.
pub mod error;
/// State-inclusion proof lookup.
pub mod state_proof;
/// Merkle transaction-inclusion proof construction and verification.
pub mod tx_proof;

pub use error::ProofError;
pub use state_proof::{SideChainProofSource, StateProofSource};
pub use tx_proof::{prove, verify, NodeHash, TxProof};
