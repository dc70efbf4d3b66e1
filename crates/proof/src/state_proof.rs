// Path: crates/proof/src/state_proof.rs
//! State-inclusion proofs: a thin pass-through over each chain's `get_proof`
//! RPC. The proof bytes are opaque to the relayer; only the
//! destination contract interprets them.

use crate::error::ProofError;
use async_trait::async_trait;
use relay_api::{MainChainRpc, SideChainRpc};

/// Fetches an MPT state-inclusion proof for `(root_hash, contract, key)`.
#[async_trait]
pub trait StateProofSource {
    /// Returns the opaque proof bytes the destination contract expects.
    async fn state_proof(&self, root_hash: [u8; 32], contract: [u8; 20], key: &[u8]) -> Result<Vec<u8>, ProofError>;
}

#[async_trait]
impl<T: MainChainRpc + Sync> StateProofSource for T {
    async fn state_proof(&self, root_hash: [u8; 32], contract: [u8; 20], key: &[u8]) -> Result<Vec<u8>, ProofError> {
        Ok(self.get_proof(root_hash, contract, key).await?)
    }
}

/// Wraps a [`relay_api::SideChainRpc`] pool as a [`StateProofSource`], since
/// the blanket impl above cannot also cover `SideChainRpc` (overlapping
/// trait impls are not allowed without specialisation).
pub struct SideChainProofSource<'a, T: SideChainRpc>(pub &'a T);

#[async_trait]
impl<T: SideChainRpc + Sync> StateProofSource for SideChainProofSource<'_, T> {
    async fn state_proof(&self, root_hash: [u8; 32], contract: [u8; 20], key: &[u8]) -> Result<Vec<u8>, ProofError> {
        Ok(self.0.get_proof(root_hash, contract, key).await?)
    }
}
