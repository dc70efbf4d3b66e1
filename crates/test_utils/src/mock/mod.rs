//! Scripted mock RPC pools implementing [`relay_api::MainChainRpc`] and
//! [`relay_api::SideChainRpc`] directly, bypassing `relay-endpoint`'s
//! transport/retry machinery entirely: tests drive deterministic sequences
//! of responses rather than a real or simulated network.

use async_trait::async_trait;
use relay_api::common::{EvmCallRequest, InvokeResult, Signer};
use relay_api::{MainChainRpc, RpcError, SideChainRpc};
use relay_types::{ApplicationLog, Receipt, SourceBlock, StateRoot, VmState};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Pops the next scripted response, or panics: a test that runs out of
/// script has a bug in its setup, not a case worth modeling as a runtime
/// error.
fn pop<T>(queue: &Mutex<VecDeque<T>>, label: &str) -> T {
    queue.lock().expect("not poisoned").pop_front().unwrap_or_else(|| panic!("{label} script exhausted"))
}

/// A scripted main-chain RPC mock. Every field is a queue of responses
/// consumed in order; fixed, rarely-varied values (`block_count`,
/// `network_magic`) are plain fields set once at construction.
#[derive(Default)]
pub struct ScriptedMainChain {
    /// Responses returned by `get_block`, keyed only by call order.
    pub blocks: Mutex<VecDeque<Result<Option<SourceBlock>, RpcError>>>,
    /// Responses returned by `get_application_log`, keyed only by call order.
    pub logs: Mutex<VecDeque<Result<Option<ApplicationLog>, RpcError>>>,
    /// Responses returned by `get_state_root`, keyed only by call order.
    pub state_roots: Mutex<VecDeque<Result<Option<StateRoot>, RpcError>>>,
    /// Responses returned by `invoke_script`, keyed only by call order.
    pub invokes: Mutex<VecDeque<Result<InvokeResult, RpcError>>>,
    /// Responses returned by `send_raw`, keyed only by call order.
    pub sends: Mutex<VecDeque<Result<[u8; 32], RpcError>>>,
    /// Responses returned by `get_raw_transaction`, keyed only by call order.
    pub inclusions: Mutex<VecDeque<Result<Option<Vec<u8>>, RpcError>>>,
    /// The fixed height returned by `get_block_count`.
    pub block_count: u32,
    /// The fixed network magic returned by `network_magic`.
    pub network_magic: u32,
    /// The fixed fee returned by `calculate_network_fee`.
    pub network_fee: i64,
    /// The fixed proof bytes returned by `get_proof`.
    pub proof: Vec<u8>,
}

#[async_trait]
impl MainChainRpc for ScriptedMainChain {
    async fn get_block(&self, _index: u32) -> Result<Option<SourceBlock>, RpcError> {
        pop(&self.blocks, "get_block")
    }

    async fn get_block_count(&self) -> Result<u32, RpcError> {
        Ok(self.block_count)
    }

    async fn get_application_log(&self, _tx_id: [u8; 32]) -> Result<Option<ApplicationLog>, RpcError> {
        pop(&self.logs, "get_application_log")
    }

    async fn get_state_root(&self, _index: u32) -> Result<Option<StateRoot>, RpcError> {
        pop(&self.state_roots, "get_state_root")
    }

    async fn get_proof(&self, _root_hash: [u8; 32], _contract: [u8; 20], _key: &[u8]) -> Result<Vec<u8>, RpcError> {
        Ok(self.proof.clone())
    }

    async fn invoke_script(&self, _script: &[u8], _signers: &[Signer]) -> Result<InvokeResult, RpcError> {
        pop(&self.invokes, "invoke_script")
    }

    async fn calculate_network_fee(&self, _tx: &[u8]) -> Result<i64, RpcError> {
        Ok(self.network_fee)
    }

    async fn send_raw(&self, _tx: &[u8]) -> Result<[u8; 32], RpcError> {
        pop(&self.sends, "send_raw")
    }

    async fn get_raw_transaction(&self, _tx_hash: [u8; 32]) -> Result<Option<Vec<u8>>, RpcError> {
        pop(&self.inclusions, "get_raw_transaction")
    }

    async fn network_magic(&self) -> Result<u32, RpcError> {
        Ok(self.network_magic)
    }
}

/// A successful, `Halt`-terminated invocation with no notifications and
/// zero GAS consumed, the shape most transaction-factory tests want by
/// default.
pub fn halted_invoke() -> InvokeResult {
    InvokeResult { state: VmState::Halt, gas_consumed: 0, fault_exception: None }
}

/// A scripted side-chain RPC mock, mirroring [`ScriptedMainChain`]'s shape
/// for the EVM-compatible side chain.
#[derive(Default)]
pub struct ScriptedSideChain {
    /// Responses returned by `get_block`, keyed only by call order.
    pub blocks: Mutex<VecDeque<Result<Option<SourceBlock>, RpcError>>>,
    /// Responses returned by `get_receipt`, keyed only by call order.
    pub receipts: Mutex<VecDeque<Result<Option<Receipt>, RpcError>>>,
    /// Responses returned by `get_state_root`, keyed only by call order.
    pub state_roots: Mutex<VecDeque<Result<Option<StateRoot>, RpcError>>>,
    /// Responses returned by `estimate_gas`, keyed only by call order.
    pub gas_estimates: Mutex<VecDeque<Result<u64, RpcError>>>,
    /// Responses returned by `send_raw`, keyed only by call order.
    pub sends: Mutex<VecDeque<Result<[u8; 32], RpcError>>>,
    /// Responses returned by `get_transaction_by_hash`, keyed only by call order.
    pub inclusions: Mutex<VecDeque<Result<Option<()>, RpcError>>>,
    /// The fixed height returned by `block_number`.
    pub block_number: u64,
    /// The fixed chain id returned by `chain_id`.
    pub chain_id: u64,
    /// The fixed gas price returned by `gas_price`.
    pub gas_price: u128,
    /// The fixed nonce returned by `transaction_count`.
    pub nonce: u64,
    /// The fixed proof bytes returned by `get_proof`.
    pub proof: Vec<u8>,
}

#[async_trait]
impl SideChainRpc for ScriptedSideChain {
    async fn get_block(&self, _index: u32) -> Result<Option<SourceBlock>, RpcError> {
        pop(&self.blocks, "get_block")
    }

    async fn chain_id(&self) -> Result<u64, RpcError> {
        Ok(self.chain_id)
    }

    async fn gas_price(&self) -> Result<u128, RpcError> {
        Ok(self.gas_price)
    }

    async fn transaction_count(&self, _address: [u8; 20]) -> Result<u64, RpcError> {
        Ok(self.nonce)
    }

    async fn estimate_gas(&self, _call: &EvmCallRequest) -> Result<u64, RpcError> {
        pop(&self.gas_estimates, "estimate_gas")
    }

    async fn send_raw(&self, _tx: &[u8]) -> Result<[u8; 32], RpcError> {
        pop(&self.sends, "send_raw")
    }

    async fn get_transaction_by_hash(&self, _hash: [u8; 32]) -> Result<Option<()>, RpcError> {
        pop(&self.inclusions, "get_transaction_by_hash")
    }

    async fn block_number(&self) -> Result<u64, RpcError> {
        Ok(self.block_number)
    }

    async fn get_receipt(&self, _hash: [u8; 32]) -> Result<Option<Receipt>, RpcError> {
        pop(&self.receipts, "get_receipt")
    }

    async fn get_state_root(&self, _index: u32) -> Result<Option<StateRoot>, RpcError> {
        pop(&self.state_roots, "get_state_root")
    }

    async fn get_proof(&self, _root_hash: [u8; 32], _contract: [u8; 20], _key: &[u8]) -> Result<Vec<u8>, RpcError> {
        Ok(self.proof.clone())
    }

    async fn native_contract(&self, _name: &str) -> Result<[u8; 20], RpcError> {
        Ok([0u8; 20])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_scripted_block_counts_in_order() {
        let main = ScriptedMainChain::default();
        main.blocks.lock().expect("not poisoned").push_back(Ok(None));
        main.blocks.lock().expect("not poisoned").push_back(Ok(Some(crate::fixtures::source_block(1, None, vec![]))));

        assert!(main.get_block(0).await.expect("ok").is_none());
        assert!(main.get_block(1).await.expect("ok").is_some());
    }

    #[tokio::test]
    #[should_panic(expected = "get_block script exhausted")]
    async fn panics_when_script_runs_out() {
        let main = ScriptedMainChain::default();
        let _ = main.get_block(0).await;
    }

    #[tokio::test]
    async fn fixed_fields_do_not_consume_a_script() {
        let side = ScriptedSideChain { chain_id: 7, ..Default::default() };
        assert_eq!(side.chain_id().await.expect("ok"), 7);
        assert_eq!(side.chain_id().await.expect("ok"), 7);
    }
}
