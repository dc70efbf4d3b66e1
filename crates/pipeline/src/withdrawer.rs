// Path: crates/pipeline/src/withdrawer.rs
//! The withdrawer wiring (side → main): side chain as source, main chain as
//! destination.

use crate::commit::wait_for_inclusion;
use crate::destination::DestinationChain;
use crate::error::FatalErrorKind;
use crate::source::SourceChain;
use async_trait::async_trait;
use relay_api::common::InclusionStatus;
use relay_api::MainChainRpc;
use relay_api::SideChainRpc;
use relay_decoder::SideChainDecoder;
use relay_proof::NodeHash;
use relay_txfactory::{NeoTxBuilder, TaskRoute, TxFactory};
use relay_types::{BlockHeader, StateRoot, TaskBatch};
use std::sync::Arc;

/// The side chain, read as the withdrawer's source.
pub struct WithdrawerSource<S: SideChainRpc> {
    side: Arc<S>,
    decoder: SideChainDecoder,
}

impl<S: SideChainRpc> WithdrawerSource<S> {
    /// Builds a source bound to `bridge_address`, the side-chain bridge
    /// contract whose `burn` logs the decoder classifies.
    pub fn new(side: Arc<S>, bridge_address: [u8; 20]) -> Result<Self, relay_decoder::DecodeError> {
        Ok(Self { side, decoder: SideChainDecoder::new(bridge_address)? })
    }
}

#[async_trait]
impl<S: SideChainRpc> SourceChain for WithdrawerSource<S> {
    async fn head(&self) -> Result<u32, relay_api::RpcError> {
        let height = self.side.block_number().await?;
        Ok(u32::try_from(height).unwrap_or(u32::MAX))
    }

    async fn fetch_batch(
        &self,
        index: u32,
        prev_header: Option<&BlockHeader>,
    ) -> Result<Option<TaskBatch>, FatalErrorKind> {
        let block = match self.side.get_block(index).await? {
            Some(block) => block,
            None => return Ok(None),
        };
        // EVM headers never carry a next-consensus commitment; `is_joint`
        // is `false` past genesis by construction.
        let is_joint = relay_types::is_joint(prev_header, &block.header);
        let mut tasks = Vec::new();
        for tx_id in &block.tx_ids {
            if let Some(receipt) = self.side.get_receipt(*tx_id).await? {
                tasks.extend(self.decoder.decode_receipt(*tx_id, &receipt)?);
            }
        }
        Ok(Some(TaskBatch { block_index: index, header: block.header, is_joint, tasks, tx_ids: block.tx_ids }))
    }

    async fn verified_state_root(
        &self,
        want: u32,
        verified_root_start: u32,
        caught_up: bool,
    ) -> Result<StateRoot, FatalErrorKind> {
        crate::root_scan::scan(|i| self.side.get_state_root(i), want, verified_root_start, caught_up).await
    }

    async fn state_proof(
        &self,
        root_hash: [u8; 32],
        contract: [u8; 20],
        key: &[u8],
    ) -> Result<Vec<u8>, relay_api::RpcError> {
        self.side.get_proof(root_hash, contract, key).await
    }

    fn node_hash(&self) -> NodeHash {
        NodeHash::SideChain
    }

    fn needs_header_sync(&self, batch: &TaskBatch) -> bool {
        batch.needs_header_sync_tasks_only()
    }
}

/// The main chain, written to as the withdrawer's destination.
pub struct WithdrawerDestination<M: MainChainRpc> {
    main: Arc<M>,
    factory: NeoTxBuilder<M>,
}

impl<M: MainChainRpc> WithdrawerDestination<M> {
    /// Builds a destination over `main`, using `factory` to build signed
    /// invocation transactions against the main-chain bridge contract.
    pub fn new(main: Arc<M>, factory: NeoTxBuilder<M>) -> Self {
        Self { main, factory }
    }

    async fn commit(&self, tx: Vec<u8>) -> Result<(), FatalErrorKind> {
        let hash = self.main.send_raw(&tx).await?;
        wait_for_inclusion(|| async {
            let seen = self.main.get_raw_transaction(hash).await?;
            Ok(if seen.is_some() { InclusionStatus::Accepted } else { InclusionStatus::Pending })
        })
        .await
    }
}

#[async_trait]
impl<M: MainChainRpc> DestinationChain for WithdrawerDestination<M> {
    async fn commit_header(&self, header: &BlockHeader) -> Result<(), FatalErrorKind> {
        match self.factory.build_header_sync(header).await? {
            Some(tx) => self.commit(tx).await,
            None => Ok(()),
        }
    }

    async fn commit_state_root(&self, root: &StateRoot) -> Result<(), FatalErrorKind> {
        match self.factory.build_stateroot_sync(root).await? {
            Some(tx) => self.commit(tx).await,
            None => Ok(()),
        }
    }

    async fn commit_task(
        &self,
        route: &TaskRoute,
        block_index: u32,
        txid: [u8; 32],
        txproof: &[u8],
        root_index: u32,
        stateproof: &[u8],
    ) -> Result<(), FatalErrorKind> {
        let built = self
            .factory
            .build_state_sync(route.method, block_index, txid, txproof, root_index, stateproof)
            .await?;
        match built {
            Some(tx) => self.commit(tx).await,
            None => Ok(()),
        }
    }
}
