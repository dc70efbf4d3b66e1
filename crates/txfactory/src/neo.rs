// Path: crates/txfactory/src/neo.rs
//! NEO invocation-transaction construction, used by the withdrawer
//! (side → main).

use crate::compact::write_var_bytes;
use crate::error::TxFactoryError;
use crate::header_codec::{encode_header, encode_state_root};
use crate::trait_def::TxFactory;
use async_trait::async_trait;
use relay_api::common::{Signer, WitnessScope};
use relay_api::{MainChainRpc, RpcError};
use relay_crypto::signing::neo::NeoSigner;
use relay_types::constants::{is_idempotent_skip, VALID_UNTIL_BLOCK_HORIZON};
use relay_types::{BlockHeader, StateRoot, VmState};
use std::sync::Arc;

/// Builds signed invocation transactions against the bridge contract
/// deployed on the main chain.
pub struct NeoTxBuilder<M: MainChainRpc> {
    main: Arc<M>,
    signer: NeoSigner,
    bridge: [u8; 20],
    relayer_script_hash: [u8; 20],
    network_magic: u32,
}

impl<M: MainChainRpc> NeoTxBuilder<M> {
    /// Builds a factory bound to `bridge`, deriving the relayer's script
    /// hash from `relayer_script_hash` (the verification-script hash the
    /// destination contract expects as the invocation signer).
    pub async fn new(
        main: Arc<M>,
        signer: NeoSigner,
        bridge: [u8; 20],
        relayer_script_hash: [u8; 20],
    ) -> Result<Self, TxFactoryError> {
        let network_magic = main.network_magic().await?;
        Ok(Self { main, signer, bridge, relayer_script_hash, network_magic })
    }

    async fn build_invocation(&self, script: Vec<u8>) -> Result<Option<Vec<u8>>, TxFactoryError> {
        let signers = vec![Signer { account: self.relayer_script_hash, scope: WitnessScope::CalledByEntry }];
        let invoke = self.main.invoke_script(&script, &signers).await?;
        if invoke.state == VmState::Fault {
            let message = invoke.fault_exception.unwrap_or_default();
            if is_idempotent_skip(&message) {
                tracing::debug!(target: "relay_txfactory", %message, "main-chain invocation already applied, skipping");
                return Ok(None);
            }
            return Err(TxFactoryError::Fault(message));
        }

        let height = self.main.get_block_count().await?;
        let valid_until_block = height.saturating_add(VALID_UNTIL_BLOCK_HORIZON);
        let unsigned = encode_unsigned_tx(&script, valid_until_block, &self.relayer_script_hash, invoke.gas_consumed);
        let network_fee = self.main.calculate_network_fee(&unsigned).await?;
        let signed = self.sign(&unsigned, network_fee)?;
        Ok(Some(signed))
    }

    fn sign(&self, unsigned: &[u8], network_fee: i64) -> Result<Vec<u8>, TxFactoryError> {
        let invocation_sig = self.signer.sign(unsigned, self.network_magic)?;
        let verification_script = self.signer.compressed_public_key()?;

        let mut invocation_script = Vec::with_capacity(2 + invocation_sig.len());
        invocation_script.push(0x0c); // PUSHDATA1-class opcode marker for the 64-byte signature push
        invocation_script.push(invocation_sig.len() as u8);
        invocation_script.extend_from_slice(&invocation_sig);

        let mut out = Vec::new();
        out.extend_from_slice(&network_fee.to_le_bytes());
        write_var_bytes(&mut out, unsigned);
        write_var_bytes(&mut out, &invocation_script);
        write_var_bytes(&mut out, &verification_script);
        Ok(out)
    }
}

/// A minimal canonical encoding of the parts of a NEO transaction this
/// relayer controls: the script, the horizon, the single signer, and the
/// system fee (set to the invocation's reported GAS consumption). The node
/// that receives this via `calculate_network_fee` / `send_raw` is
/// responsible for the rest of the wire format; this crate only needs a
/// stable byte string to sign and to estimate fees against.
fn encode_unsigned_tx(script: &[u8], valid_until_block: u32, signer: &[u8; 20], system_fee: i64) -> Vec<u8> {
    let mut out = Vec::new();
    write_var_bytes(&mut out, script);
    out.extend_from_slice(&valid_until_block.to_le_bytes());
    out.extend_from_slice(signer);
    out.extend_from_slice(&system_fee.to_le_bytes());
    out
}

#[async_trait]
impl<M: MainChainRpc> TxFactory for NeoTxBuilder<M> {
    async fn build_header_sync(&self, header: &BlockHeader) -> Result<Option<Vec<u8>>, TxFactoryError> {
        let payload = encode_header(header);
        let script = invocation_script_for("syncHeader", &[payload], self.bridge);
        self.build_invocation(script).await
    }

    async fn build_stateroot_sync(&self, root: &StateRoot) -> Result<Option<Vec<u8>>, TxFactoryError> {
        let payload = encode_state_root(root);
        let script = invocation_script_for("syncStateRoot", &[payload], self.bridge);
        self.build_invocation(script).await
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
        let mut args = Vec::new();
        args.extend_from_slice(&block_index.to_le_bytes());
        args.push(b'|');
        args.extend_from_slice(&txid);
        args.push(b'|');
        args.extend_from_slice(txproof);
        args.push(b'|');
        args.extend_from_slice(&root_index.to_le_bytes());
        args.push(b'|');
        args.extend_from_slice(stateproof);
        let script = invocation_script_for(method, &[args], self.bridge);
        self.build_invocation(script).await
    }
}

/// Builds a minimal `bridge.<method>(args...)` invocation script: the
/// contract hash, the method name, and the joined argument bytes, enough
/// for `invoke_script` to execute deterministically against the same
/// inputs every time. The exact NEO VM opcode sequence the destination
/// interpreter expects is an external codec concern.
fn invocation_script_for(method: &str, args: &[Vec<u8>], contract: [u8; 20]) -> Vec<u8> {
    let mut out = Vec::new();
    write_var_bytes(&mut out, &contract);
    write_var_bytes(&mut out, method.as_bytes());
    for arg in args {
        write_var_bytes(&mut out, arg);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_api::common::InvokeResult;
    use relay_types::{ApplicationLog, SourceBlock};

    struct MockMain {
        fault: Option<&'static str>,
    }

    #[async_trait]
    impl MainChainRpc for MockMain {
        async fn get_block(&self, _index: u32) -> Result<Option<SourceBlock>, RpcError> {
            Ok(None)
        }
        async fn get_block_count(&self) -> Result<u32, RpcError> {
            Ok(1000)
        }
        async fn get_application_log(&self, _tx_id: [u8; 32]) -> Result<Option<ApplicationLog>, RpcError> {
            Ok(None)
        }
        async fn get_state_root(&self, _index: u32) -> Result<Option<StateRoot>, RpcError> {
            Ok(None)
        }
        async fn get_proof(&self, _root_hash: [u8; 32], _contract: [u8; 20], _key: &[u8]) -> Result<Vec<u8>, RpcError> {
            Ok(vec![])
        }
        async fn invoke_script(&self, _script: &[u8], _signers: &[Signer]) -> Result<InvokeResult, RpcError> {
            match self.fault {
                Some(msg) => {
                    Ok(InvokeResult { state: VmState::Fault, gas_consumed: 0, fault_exception: Some(msg.to_string()) })
                }
                None => Ok(InvokeResult { state: VmState::Halt, gas_consumed: 1_234_567, fault_exception: None }),
            }
        }
        async fn calculate_network_fee(&self, _tx: &[u8]) -> Result<i64, RpcError> {
            Ok(100_000)
        }
        async fn send_raw(&self, _tx: &[u8]) -> Result<[u8; 32], RpcError> {
            Ok([0u8; 32])
        }
        async fn get_raw_transaction(&self, _tx_hash: [u8; 32]) -> Result<Option<Vec<u8>>, RpcError> {
            Ok(None)
        }
        async fn network_magic(&self) -> Result<u32, RpcError> {
            Ok(0x334f_454e)
        }
    }

    fn sample_root() -> StateRoot {
        StateRoot { version: 0, index: 1, root_hash: [1u8; 32], witnesses: vec![vec![9]] }
    }

    #[tokio::test]
    async fn builds_signed_stateroot_sync_tx() {
        let main = Arc::new(MockMain { fault: None });
        let signer = NeoSigner::from_bytes(&[4u8; 32]).unwrap();
        let builder = NeoTxBuilder::new(main, signer, [6u8; 20], [7u8; 20]).await.unwrap();
        let tx = builder.build_stateroot_sync(&sample_root()).await.unwrap();
        assert!(tx.is_some());
    }

    #[tokio::test]
    async fn fault_with_idempotency_signal_yields_no_transaction() {
        let main = Arc::new(MockMain { fault: Some("already synced") });
        let signer = NeoSigner::from_bytes(&[4u8; 32]).unwrap();
        let builder = NeoTxBuilder::new(main, signer, [6u8; 20], [7u8; 20]).await.unwrap();
        let tx = builder.build_stateroot_sync(&sample_root()).await.unwrap();
        assert!(tx.is_none());
    }

    #[tokio::test]
    async fn genuine_fault_is_propagated() {
        let main = Arc::new(MockMain { fault: Some("stack underflow") });
        let signer = NeoSigner::from_bytes(&[4u8; 32]).unwrap();
        let builder = NeoTxBuilder::new(main, signer, [6u8; 20], [7u8; 20]).await.unwrap();
        let err = builder.build_stateroot_sync(&sample_root()).await.unwrap_err();
        assert!(matches!(err, TxFactoryError::Fault(_)));
    }
}
