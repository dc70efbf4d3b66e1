// Path: crates/api/src/side_chain.rs
//! The side (EVM-compatible) chain's RPC capability interface.

use crate::common::EvmCallRequest;
use crate::error::RpcError;
use async_trait::async_trait;
use relay_types::{Receipt, SourceBlock, StateRoot};

/// The side-chain node operations the relayer depends on; the destination-side
/// mirror of [`crate::main_chain::MainChainRpc`] for the withdrawer direction,
/// and the destination for the minter direction.
#[async_trait]
pub trait SideChainRpc: Send + Sync {
    /// Fetches the block at `index` as a source block (header plus
    /// transaction hashes, in block order), or `None` if it does not exist
    /// yet. Used when this chain is the withdrawer's source.
    async fn get_block(&self, index: u32) -> Result<Option<SourceBlock>, RpcError>;

    /// The EIP-155 chain id used to scope transaction signatures.
    async fn chain_id(&self) -> Result<u64, RpcError>;

    /// The current suggested gas price, in wei.
    async fn gas_price(&self) -> Result<u128, RpcError>;

    /// The next nonce for `address`.
    async fn transaction_count(&self, address: [u8; 20]) -> Result<u64, RpcError>;

    /// Estimates the gas a call would consume.
    async fn estimate_gas(&self, call: &EvmCallRequest) -> Result<u64, RpcError>;

    /// Broadcasts a fully-signed, RLP-encoded legacy transaction.
    async fn send_raw(&self, tx: &[u8]) -> Result<[u8; 32], RpcError>;

    /// Fetches a previously broadcast transaction by hash, or `None` if not
    /// yet observed by the queried node.
    async fn get_transaction_by_hash(&self, hash: [u8; 32]) -> Result<Option<()>, RpcError>;

    /// The current chain height.
    async fn block_number(&self) -> Result<u64, RpcError>;

    /// Fetches the transaction receipt for `hash`.
    async fn get_receipt(&self, hash: [u8; 32]) -> Result<Option<Receipt>, RpcError>;

    /// Fetches the state root at `index`.
    async fn get_state_root(&self, index: u32) -> Result<Option<StateRoot>, RpcError>;

    /// Fetches an MPT state-inclusion proof for `key` under `contract`, at `root_hash`.
    async fn get_proof(
        &self,
        root_hash: [u8; 32],
        contract: [u8; 20],
        key: &[u8],
    ) -> Result<Vec<u8>, RpcError>;

    /// Resolves a well-known native contract's address by name (e.g. the
    /// bridge contract, if deployed at a well-known side-chain address).
    async fn native_contract(&self, name: &str) -> Result<[u8; 20], RpcError>;
}
