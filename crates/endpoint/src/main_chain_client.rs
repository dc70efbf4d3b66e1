// Path: crates/endpoint/src/main_chain_client.rs
//! [`MainChainRpc`] over a [`Pool`] of [`JsonRpcTransport`]s, bound to the
//! main (NEO-style) chain's seed list.

use crate::pool::Pool;
use crate::transport::JsonRpcTransport;
use async_trait::async_trait;
use relay_api::common::{InvokeResult, Signer, WitnessScope};
use relay_api::{MainChainRpc, RpcError};
use relay_types::{ApplicationLog, SourceBlock, StateRoot};
use serde_json::json;

/// The pooled main-chain RPC client.
pub struct MainChainPool {
    pool: Pool<JsonRpcTransport>,
}

impl MainChainPool {
    /// Builds a pool from a list of seed URLs.
    pub fn new(seeds: Vec<String>) -> Self {
        Self { pool: Pool::new(seeds.into_iter().map(JsonRpcTransport::new).collect()) }
    }

    /// Walks the seed list once, failing only if every seed is unreachable.
    pub async fn connect(&self) -> Result<(), RpcError> {
        self.pool.connect(|t| async move { t.call::<_, u32>("getblockcount", json!([])).await.map(|_| ()) }).await
    }
}

fn encode_witness_scope(scope: WitnessScope) -> &'static str {
    match scope {
        WitnessScope::CalledByEntry => "CalledByEntry",
    }
}

#[async_trait]
impl MainChainRpc for MainChainPool {
    async fn get_block(&self, index: u32) -> Result<Option<SourceBlock>, RpcError> {
        self.pool.call(|t| async move { t.call("getblock", json!([index, 1])).await }).await
    }

    async fn get_block_count(&self) -> Result<u32, RpcError> {
        self.pool.call(|t| async move { t.call("getblockcount", json!([])).await }).await
    }

    async fn get_application_log(&self, tx_id: [u8; 32]) -> Result<Option<ApplicationLog>, RpcError> {
        let hex_id = format!("0x{}", hex::encode(tx_id));
        self.pool.call(|t| {
            let hex_id = hex_id.clone();
            async move { t.call("getapplicationlog", json!([hex_id])).await }
        }).await
    }

    async fn get_state_root(&self, index: u32) -> Result<Option<StateRoot>, RpcError> {
        self.pool.call(|t| async move { t.call("getstateroot", json!([index])).await }).await
    }

    async fn get_proof(
        &self,
        root_hash: [u8; 32],
        contract: [u8; 20],
        key: &[u8],
    ) -> Result<Vec<u8>, RpcError> {
        let root_hex = format!("0x{}", hex::encode(root_hash));
        let contract_hex = format!("0x{}", hex::encode(contract));
        let key_b64 = base64_encode(key);
        self.pool
            .call(|t| {
                let (root_hex, contract_hex, key_b64) = (root_hex.clone(), contract_hex.clone(), key_b64.clone());
                async move { t.call("getproof", json!([root_hex, contract_hex, key_b64])).await }
            })
            .await
    }

    async fn invoke_script(&self, script: &[u8], signers: &[Signer]) -> Result<InvokeResult, RpcError> {
        let script_b64 = base64_encode(script);
        let signers_json: Vec<_> = signers
            .iter()
            .map(|s| json!({ "account": format!("0x{}", hex::encode(s.account)), "scopes": encode_witness_scope(s.scope) }))
            .collect();
        self.pool
            .call(|t| {
                let (script_b64, signers_json) = (script_b64.clone(), signers_json.clone());
                async move { t.call("invokescript", json!([script_b64, signers_json])).await }
            })
            .await
    }

    async fn calculate_network_fee(&self, tx: &[u8]) -> Result<i64, RpcError> {
        let tx_b64 = base64_encode(tx);
        self.pool.call(|t| {
            let tx_b64 = tx_b64.clone();
            async move { t.call("calculatenetworkfee", json!([tx_b64])).await }
        }).await
    }

    async fn send_raw(&self, tx: &[u8]) -> Result<[u8; 32], RpcError> {
        let tx_b64 = base64_encode(tx);
        let hex_hash: String = self
            .pool
            .call(|t| {
                let tx_b64 = tx_b64.clone();
                async move { t.call("sendrawtransaction", json!([tx_b64])).await }
            })
            .await?;
        decode_hash(&hex_hash)
    }

    async fn get_raw_transaction(&self, tx_hash: [u8; 32]) -> Result<Option<Vec<u8>>, RpcError> {
        let hex_hash = format!("0x{}", hex::encode(tx_hash));
        self.pool
            .call(|t| {
                let hex_hash = hex_hash.clone();
                async move { t.call("getrawtransaction", json!([hex_hash, 0])).await }
            })
            .await
    }

    async fn network_magic(&self) -> Result<u32, RpcError> {
        self.pool.call(|t| async move { t.call("getversion", json!([])).await }).await
    }
}

fn base64_encode(data: &[u8]) -> String {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    STANDARD.encode(data)
}

fn decode_hash(hex_hash: &str) -> Result<[u8; 32], RpcError> {
    let trimmed = hex_hash.strip_prefix("0x").unwrap_or(hex_hash);
    let bytes = hex::decode(trimmed).map_err(|e| RpcError::Transport(format!("bad tx hash: {e}")))?;
    bytes.try_into().map_err(|b: Vec<u8>| RpcError::Transport(format!("tx hash wrong length: {}", b.len())))
}
