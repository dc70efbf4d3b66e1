// Path: crates/txfactory/src/evm.rs
//! Legacy EIP-155 transaction construction for the EVM-compatible side
//! chain, used by the minter (main → side).

use crate::abi::{encode_bytes_call, encode_state_sync_call};
use crate::error::TxFactoryError;
use crate::header_codec::{encode_header, encode_state_root};
use crate::trait_def::TxFactory;
use async_trait::async_trait;
use relay_api::common::EvmCallRequest;
use relay_api::{RpcError, SideChainRpc};
use relay_crypto::algorithms::hash::keccak256;
use relay_crypto::signing::evm::EvmSigner;
use relay_types::constants::is_idempotent_skip;
use relay_types::{BlockHeader, StateRoot};
use rlp::RlpStream;
use std::sync::Arc;

/// Builds signed legacy transactions against the bridge contract deployed
/// on the side chain.
pub struct EvmTxBuilder<S: SideChainRpc> {
    side: Arc<S>,
    signer: EvmSigner,
    bridge: [u8; 20],
    relayer: [u8; 20],
    chain_id: u64,
}

impl<S: SideChainRpc> EvmTxBuilder<S> {
    /// Builds a factory bound to `bridge`, fetching the chain id once at
    /// construction time (it does not change for the process lifetime).
    pub async fn new(side: Arc<S>, signer: EvmSigner, bridge: [u8; 20]) -> Result<Self, TxFactoryError> {
        let relayer = signer.address()?;
        let chain_id = side.chain_id().await?;
        Ok(Self { side, signer, bridge, relayer, chain_id })
    }

    async fn build_call(&self, data: Vec<u8>) -> Result<Option<Vec<u8>>, TxFactoryError> {
        let nonce = self.side.transaction_count(self.relayer).await?;
        let gas_price = self.side.gas_price().await?;
        let call = EvmCallRequest { from: self.relayer, to: self.bridge, value: 0, data: data.clone(), gas_price };
        let gas = match self.side.estimate_gas(&call).await {
            Ok(gas) => gas,
            Err(RpcError::Application { message, .. }) if is_idempotent_skip(&message) => {
                tracing::debug!(target: "relay_txfactory", %message, "side-chain call already applied, skipping");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        self.sign_legacy(nonce, gas_price, gas, data).map(Some)
    }

    fn sign_legacy(&self, nonce: u64, gas_price: u128, gas: u64, data: Vec<u8>) -> Result<Vec<u8>, TxFactoryError> {
        let unsigned = rlp_unsigned(nonce, gas_price, gas, self.bridge, &data, self.chain_id);
        let digest = keccak256(&unsigned)?;
        let sig = self.signer.sign_prehash(&digest)?;
        let v = self.chain_id.saturating_mul(2).saturating_add(35).saturating_add(u64::from(sig.recovery_id));
        Ok(rlp_signed(nonce, gas_price, gas, self.bridge, &data, v, &sig.r, &sig.s))
    }
}

/// RLP encodes integers as minimal-length big-endian byte strings (no
/// leading zero byte); `u128` has no built-in `rlp::Encodable` impl so this
/// covers `gas_price`.
fn minimal_be(value: u128) -> Vec<u8> {
    let full = value.to_be_bytes();
    let first_nonzero = full.iter().position(|&b| b != 0);
    match first_nonzero {
        Some(i) => full[i..].to_vec(),
        None => Vec::new(),
    }
}

fn rlp_unsigned(nonce: u64, gas_price: u128, gas: u64, to: [u8; 20], data: &[u8], chain_id: u64) -> Vec<u8> {
    let mut s = RlpStream::new_list(9);
    s.append(&nonce);
    s.append(&minimal_be(gas_price));
    s.append(&gas);
    s.append(&to.as_slice());
    s.append(&0u8);
    s.append(&data);
    s.append(&chain_id);
    s.append(&0u8);
    s.append(&0u8);
    s.out().to_vec()
}

fn rlp_signed(nonce: u64, gas_price: u128, gas: u64, to: [u8; 20], data: &[u8], v: u64, r: &[u8; 32], s_val: &[u8; 32]) -> Vec<u8> {
    let mut s = RlpStream::new_list(9);
    s.append(&nonce);
    s.append(&minimal_be(gas_price));
    s.append(&gas);
    s.append(&to.as_slice());
    s.append(&0u8);
    s.append(&data);
    s.append(&v);
    s.append(&r.as_slice());
    s.append(&s_val.as_slice());
    s.out().to_vec()
}

#[async_trait]
impl<S: SideChainRpc> TxFactory for EvmTxBuilder<S> {
    async fn build_header_sync(&self, header: &BlockHeader) -> Result<Option<Vec<u8>>, TxFactoryError> {
        let payload = encode_header(header);
        let data = encode_bytes_call("syncHeader(bytes)", &payload)?;
        self.build_call(data).await
    }

    async fn build_stateroot_sync(&self, root: &StateRoot) -> Result<Option<Vec<u8>>, TxFactoryError> {
        let payload = encode_state_root(root);
        let data = encode_bytes_call("syncStateRoot(bytes)", &payload)?;
        self.build_call(data).await
    }

    async fn build_state_sync(
        &self,
        method: &str,
        block_index: u32,
        txid: [u8; 32],
        txproof: &[u8],
        root_index: u32,
        stateproof: &[u8],
    ) -> Result<Option<Vec<u8>>, TxFactoryError> {
        let signature = format!("{method}(uint32,uint256,bytes,uint32,bytes)");
        let data = encode_state_sync_call(&signature, block_index, txid, txproof, root_index, stateproof)?;
        self.build_call(data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_types::{Receipt, StateRoot as Root};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct MockSide {
        reject_estimate: AtomicBool,
    }

    #[async_trait]
    impl SideChainRpc for MockSide {
        async fn get_block(&self, _index: u32) -> Result<Option<relay_types::SourceBlock>, RpcError> {
            Ok(None)
        }
        async fn chain_id(&self) -> Result<u64, RpcError> {
            Ok(12345)
        }
        async fn gas_price(&self) -> Result<u128, RpcError> {
            Ok(1_000_000_000)
        }
        async fn transaction_count(&self, _address: [u8; 20]) -> Result<u64, RpcError> {
            Ok(4)
        }
        async fn estimate_gas(&self, _call: &EvmCallRequest) -> Result<u64, RpcError> {
            if self.reject_estimate.load(Ordering::SeqCst) {
                Err(RpcError::Application { code: -32000, message: "already synced".into() })
            } else {
                Ok(21_000)
            }
        }
        async fn send_raw(&self, _tx: &[u8]) -> Result<[u8; 32], RpcError> {
            Ok([0u8; 32])
        }
        async fn get_transaction_by_hash(&self, _hash: [u8; 32]) -> Result<Option<()>, RpcError> {
            Ok(None)
        }
        async fn block_number(&self) -> Result<u64, RpcError> {
            Ok(1)
        }
        async fn get_receipt(&self, _hash: [u8; 32]) -> Result<Option<Receipt>, RpcError> {
            Ok(None)
        }
        async fn get_state_root(&self, _index: u32) -> Result<Option<Root>, RpcError> {
            Ok(None)
        }
        async fn get_proof(&self, _root_hash: [u8; 32], _contract: [u8; 20], _key: &[u8]) -> Result<Vec<u8>, RpcError> {
            Ok(vec![])
        }
        async fn native_contract(&self, _name: &str) -> Result<[u8; 20], RpcError> {
            Ok([0u8; 20])
        }
    }

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 0,
            prev_hash: [0u8; 32],
            merkle_root: [0u8; 32],
            timestamp: 0,
            nonce: 0,
            index: 1,
            primary_index: 0,
            next_consensus: Some([0u8; 20]),
            witness: Default::default(),
        }
    }

    #[tokio::test]
    async fn builds_signed_header_sync_tx() {
        let side = Arc::new(MockSide { reject_estimate: AtomicBool::new(false) });
        let signer = EvmSigner::from_bytes(&[3u8; 32]).unwrap();
        let builder = EvmTxBuilder::new(side, signer, [5u8; 20]).await.unwrap();
        let tx = builder.build_header_sync(&sample_header()).await.unwrap();
        assert!(tx.is_some());
    }

    #[tokio::test]
    async fn already_synced_yields_no_transaction() {
        let side = Arc::new(MockSide { reject_estimate: AtomicBool::new(true) });
        let signer = EvmSigner::from_bytes(&[3u8; 32]).unwrap();
        let builder = EvmTxBuilder::new(side, signer, [5u8; 20]).await.unwrap();
        let tx = builder.build_header_sync(&sample_header()).await.unwrap();
        assert!(tx.is_none());
    }
}
