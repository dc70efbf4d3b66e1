// Path: crates/pipeline/src/minter.rs
//! The minter wiring (main → side): main chain as source, side chain as
//! destination.

use crate::commit::wait_for_inclusion;
use crate::destination::DestinationChain;
use crate::error::FatalErrorKind;
use crate::source::SourceChain;
use async_trait::async_trait;
use relay_api::common::InclusionStatus;
use relay_api::MainChainRpc;
use relay_api::SideChainRpc;
use relay_decoder::MainChainDecoder;
use relay_proof::NodeHash;
use relay_txfactory::{EvmTxBuilder, TaskRoute, TxFactory};
use relay_types::{BlockHeader, StateRoot, TaskBatch};
use std::sync::Arc;

/// The main chain, read as the minter's source.
pub struct MinterSource<M: MainChainRpc> {
    main: Arc<M>,
    decoder: MainChainDecoder,
}

impl<M: MainChainRpc> MinterSource<M> {
    /// Builds a source bound to `bridge_contract`, the main-chain bridge
    /// contract whose notifications the decoder classifies.
    pub fn new(main: Arc<M>, bridge_contract: [u8; 20]) -> Self {
        Self { main, decoder: MainChainDecoder::new(bridge_contract) }
    }
}

#[async_trait]
impl<M: MainChainRpc> SourceChain for MinterSource<M> {
    async fn head(&self) -> Result<u32, relay_api::RpcError> {
        self.main.get_block_count().await
    }

    async fn fetch_batch(
        &self,
        index: u32,
        prev_header: Option<&BlockHeader>,
    ) -> Result<Option<TaskBatch>, FatalErrorKind> {
        let block = match self.main.get_block(index).await? {
            Some(block) => block,
            None => return Ok(None),
        };
        let is_joint = relay_types::is_joint(prev_header, &block.header);
        let mut tasks = Vec::new();
        for tx_id in &block.tx_ids {
            if let Some(log) = self.main.get_application_log(*tx_id).await? {
                tasks.extend(self.decoder.decode_log(&log)?);
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
        crate::root_scan::scan(|i| self.main.get_state_root(i), want, verified_root_start, caught_up).await
    }

    async fn state_proof(
        &self,
        root_hash: [u8; 32],
        contract: [u8; 20],
        key: &[u8],
    ) -> Result<Vec<u8>, relay_api::RpcError> {
        self.main.get_proof(root_hash, contract, key).await
    }

    fn node_hash(&self) -> NodeHash {
        NodeHash::MainChain
    }

    fn needs_header_sync(&self, batch: &TaskBatch) -> bool {
        batch.needs_header_sync_joint_or_tasks()
    }
}

/// The side chain, written to as the minter's destination.
pub struct MinterDestination<S: SideChainRpc> {
    side: Arc<S>,
    factory: EvmTxBuilder<S>,
}

impl<S: SideChainRpc> MinterDestination<S> {
    /// Builds a destination over `side`, using `factory` to build signed
    /// transactions against the side-chain bridge contract.
    pub fn new(side: Arc<S>, factory: EvmTxBuilder<S>) -> Self {
        Self { side, factory }
    }

    async fn commit(&self, tx: Vec<u8>) -> Result<(), FatalErrorKind> {
        let hash = self.side.send_raw(&tx).await?;
        wait_for_inclusion(|| async {
            let seen = self.side.get_transaction_by_hash(hash).await?;
            Ok(if seen.is_some() { InclusionStatus::Accepted } else { InclusionStatus::Pending })
        })
        .await
    }
}

#[async_trait]
impl<S: SideChainRpc> DestinationChain for MinterDestination<S> {
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
