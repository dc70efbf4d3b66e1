// Path: crates/api/src/main_chain.rs
//! The main (NEO-style) chain's RPC capability interface.
//!
//! This is a narrow capability interface: the rotation + retry policy that
//! turns a seed list into a single client lives in `relay-endpoint`, behind
//! this trait, so tests can substitute a scripted mock.

use crate::common::{InvokeResult, Signer};
use crate::error::RpcError;
use async_trait::async_trait;
use relay_types::{ApplicationLog, SourceBlock, StateRoot};

/// The main-chain node operations the relayer depends on.
#[async_trait]
pub trait MainChainRpc: Send + Sync {
    /// Fetches the block at `index`, or `None` if it does not exist yet.
    async fn get_block(&self, index: u32) -> Result<Option<SourceBlock>, RpcError>;

    /// The current chain height (one past the highest produced index).
    async fn get_block_count(&self) -> Result<u32, RpcError>;

    /// Fetches the application log for `tx_id`.
    async fn get_application_log(&self, tx_id: [u8; 32]) -> Result<Option<ApplicationLog>, RpcError>;

    /// Fetches the state root at `index`.
    async fn get_state_root(&self, index: u32) -> Result<Option<StateRoot>, RpcError>;

    /// Fetches an MPT state-inclusion proof for `key` under `contract`, at `root_hash`.
    async fn get_proof(
        &self,
        root_hash: [u8; 32],
        contract: [u8; 20],
        key: &[u8],
    ) -> Result<Vec<u8>, RpcError>;

    /// Invokes `script` against the current state with the given signers,
    /// without committing it. Used to obtain GAS consumption estimates.
    async fn invoke_script(&self, script: &[u8], signers: &[Signer]) -> Result<InvokeResult, RpcError>;

    /// Computes the network fee a signed transaction would require.
    async fn calculate_network_fee(&self, tx: &[u8]) -> Result<i64, RpcError>;

    /// Broadcasts a fully-signed, serialised transaction.
    async fn send_raw(&self, tx: &[u8]) -> Result<[u8; 32], RpcError>;

    /// Fetches a previously broadcast transaction by hash, or `None` if not
    /// yet observed by the queried node.
    async fn get_raw_transaction(&self, tx_hash: [u8; 32]) -> Result<Option<Vec<u8>>, RpcError>;

    /// The network magic used to scope transaction signatures.
    async fn network_magic(&self) -> Result<u32, RpcError>;
}
