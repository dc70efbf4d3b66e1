// Path: crates/txfactory/src/trait_def.rs
//! The transaction-factory capability interface: shared by the
//! EVM-destination and NEO-destination builders, parametrised only by the
//! payload each operation shape carries.

use crate::error::TxFactoryError;
use async_trait::async_trait;
use relay_types::{BlockHeader, StateRoot};

/// Builds signed destination-chain transactions for the three operation
/// shapes the relay pipeline drives. Each returns `Ok(None)` in place of a
/// transaction when the destination already reflects the requested change
///, so the pipeline can skip committing.
#[async_trait]
pub trait TxFactory: Send + Sync {
    /// Builds a `syncHeader`-equivalent transaction for `header`.
    async fn build_header_sync(&self, header: &BlockHeader) -> Result<Option<Vec<u8>>, TxFactoryError>;

    /// Builds a `syncStateRoot`-equivalent transaction for `root`.
    async fn build_stateroot_sync(&self, root: &StateRoot) -> Result<Option<Vec<u8>>, TxFactoryError>;

    /// Builds a task-specific state-sync transaction.
    #[allow(clippy::too_many_arguments)]
    async fn build_state_sync(
        &self,
        method: &str,
        block_index: u32,
        txid: [u8; 32],
        txproof: &[u8],
        root_index: u32,
        stateproof: &[u8],
    ) -> Result<Option<Vec<u8>>, TxFactoryError>;
}
