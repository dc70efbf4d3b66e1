// Path: crates/endpoint/src/side_chain_client.rs
//! [`SideChainRpc`] over a [`Pool`] of [`JsonRpcTransport`]s, bound to the
//! side (EVM-compatible) chain's seed list.

use crate::pool::Pool;
use crate::transport::JsonRpcTransport;
use async_trait::async_trait;
use relay_api::common::EvmCallRequest;
use relay_api::{RpcError, SideChainRpc};
use relay_types::{Receipt, SourceBlock, StateRoot};
use serde_json::json;

/// The pooled side-chain RPC client.
pub struct SideChainPool {
    pool: Pool<JsonRpcTransport>,
}

impl SideChainPool {
    /// Builds a pool from a list of seed URLs.
    pub fn new(seeds: Vec<String>) -> Self {
        Self { pool: Pool::new(seeds.into_iter().map(JsonRpcTransport::new).collect()) }
    }

    /// Walks the seed list once, failing only if every seed is unreachable.
    pub async fn connect(&self) -> Result<(), RpcError> {
        self.pool.connect(|t| async move { t.call::<_, String>("eth_blockNumber", json!([])).await.map(|_| ()) }).await
    }
}

fn from_hex_quantity(s: &str) -> Result<u64, RpcError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    u64::from_str_radix(trimmed, 16).map_err(|e| RpcError::Transport(format!("bad quantity {s}: {e}")))
}

fn from_hex_u128(s: &str) -> Result<u128, RpcError> {
    let trimmed = s.strip_prefix("0x").unwrap_or(s);
    u128::from_str_radix(trimmed, 16).map_err(|e| RpcError::Transport(format!("bad quantity {s}: {e}")))
}

#[async_trait]
impl SideChainRpc for SideChainPool {
    async fn get_block(&self, index: u32) -> Result<Option<SourceBlock>, RpcError> {
        // A custom bridge RPC method, not a standard `eth_*` call: the node
        // returns the block already shaped as a `SourceBlock` (header with
        // `next_consensus = null`, plus ordered transaction hashes), the
        // same convention `bridge_getStateRoot` / `bridge_getProof` use.
        self.pool.call(|t| async move { t.call("bridge_getSourceBlock", json!([index])).await }).await
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        let hex_id: String = self.pool.call(|t| async move { t.call("eth_chainId", json!([])).await }).await?;
        from_hex_quantity(&hex_id)
    }

    async fn gas_price(&self) -> Result<u128, RpcError> {
        let hex_price: String = self.pool.call(|t| async move { t.call("eth_gasPrice", json!([])).await }).await?;
        from_hex_u128(&hex_price)
    }

    async fn transaction_count(&self, address: [u8; 20]) -> Result<u64, RpcError> {
        let addr_hex = format!("0x{}", hex::encode(address));
        let hex_count: String = self
            .pool
            .call(|t| {
                let addr_hex = addr_hex.clone();
                async move { t.call("eth_getTransactionCount", json!([addr_hex, "pending"])).await }
            })
            .await?;
        from_hex_quantity(&hex_count)
    }

    async fn estimate_gas(&self, call: &EvmCallRequest) -> Result<u64, RpcError> {
        let params = json!({
            "from": format!("0x{}", hex::encode(call.from)),
            "to": format!("0x{}", hex::encode(call.to)),
            "value": format!("0x{:x}", call.value),
            "data": format!("0x{}", hex::encode(&call.data)),
            "gasPrice": format!("0x{:x}", call.gas_price),
        });
        let hex_gas: String = self.pool.call(|t| {
            let params = params.clone();
            async move { t.call("eth_estimateGas", json!([params])).await }
        }).await?;
        from_hex_quantity(&hex_gas)
    }

    async fn send_raw(&self, tx: &[u8]) -> Result<[u8; 32], RpcError> {
        let raw_hex = format!("0x{}", hex::encode(tx));
        let hex_hash: String = self
            .pool
            .call(|t| {
                let raw_hex = raw_hex.clone();
                async move { t.call("eth_sendRawTransaction", json!([raw_hex])).await }
            })
            .await?;
        let trimmed = hex_hash.strip_prefix("0x").unwrap_or(&hex_hash);
        let bytes = hex::decode(trimmed).map_err(|e| RpcError::Transport(format!("bad tx hash: {e}")))?;
        bytes.try_into().map_err(|b: Vec<u8>| RpcError::Transport(format!("tx hash wrong length: {}", b.len())))
    }

    async fn get_transaction_by_hash(&self, hash: [u8; 32]) -> Result<Option<()>, RpcError> {
        let hex_hash = format!("0x{}", hex::encode(hash));
        let found: Option<serde_json::Value> = self
            .pool
            .call(|t| {
                let hex_hash = hex_hash.clone();
                async move { t.call("eth_getTransactionByHash", json!([hex_hash])).await }
            })
            .await?;
        Ok(found.map(|_| ()))
    }

    async fn block_number(&self) -> Result<u64, RpcError> {
        let hex_number: String = self.pool.call(|t| async move { t.call("eth_blockNumber", json!([])).await }).await?;
        from_hex_quantity(&hex_number)
    }

    async fn get_receipt(&self, hash: [u8; 32]) -> Result<Option<Receipt>, RpcError> {
        let hex_hash = format!("0x{}", hex::encode(hash));
        self.pool
            .call(|t| {
                let hex_hash = hex_hash.clone();
                async move { t.call("eth_getTransactionReceipt", json!([hex_hash])).await }
            })
            .await
    }

    async fn get_state_root(&self, index: u32) -> Result<Option<StateRoot>, RpcError> {
        self.pool.call(|t| async move { t.call("bridge_getStateRoot", json!([index])).await }).await
    }

    async fn get_proof(
        &self,
        root_hash: [u8; 32],
        contract: [u8; 20],
        key: &[u8],
    ) -> Result<Vec<u8>, RpcError> {
        let root_hex = format!("0x{}", hex::encode(root_hash));
        let contract_hex = format!("0x{}", hex::encode(contract));
        let key_hex = format!("0x{}", hex::encode(key));
        self.pool
            .call(|t| {
                let (root_hex, contract_hex, key_hex) = (root_hex.clone(), contract_hex.clone(), key_hex.clone());
                async move { t.call("bridge_getProof", json!([root_hex, contract_hex, key_hex])).await }
            })
            .await
    }

    async fn native_contract(&self, name: &str) -> Result<[u8; 20], RpcError> {
        let hex_addr: String = self
            .pool
            .call(|t| {
                let name = name.to_string();
                async move { t.call("bridge_nativeContract", json!([name])).await }
            })
            .await?;
        let trimmed = hex_addr.strip_prefix("0x").unwrap_or(&hex_addr);
        let bytes = hex::decode(trimmed).map_err(|e| RpcError::Transport(format!("bad address: {e}")))?;
        bytes.try_into().map_err(|b: Vec<u8>| RpcError::Transport(format!("address wrong length: {}", b.len())))
    }
}
