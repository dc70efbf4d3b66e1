// Path: crates/proof/src/error.rs
//! Proof-builder errors.

use relay_api::RpcError;
use relay_crypto::error::CryptoError;
use thiserror::Error;

/// Errors raised while building or fetching a proof.
#[derive(Debug, Error)]
pub enum ProofError {
    /// The leaf set was empty; there is nothing to prove.
    #[error("cannot build a transaction proof over an empty leaf set")]
    EmptyLeafSet,
    /// `target_index` was not within the leaf set.
    #[error("target index {index} out of range for {len} leaves")]
    TargetOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of leaves available.
        len: usize,
    },
    /// A tree level exceeded 32 levels (more than 2^32 leaves).
    #[error("transaction set too large to index with a u32 path bitmap")]
    TooManyLevels,
    /// The underlying node-hash function failed.
    #[error("node hash failed: {0}")]
    Hash(#[from] CryptoError),
    /// Fetching a state proof from the source chain's RPC failed.
    #[error("state proof fetch failed: {0}")]
    Rpc(#[from] RpcError),
    /// An internal bookkeeping invariant was violated; indicates a bug in
    /// this crate rather than bad input.
    #[error("proof builder invariant violated: {0}")]
    Internal(String),
}
