// Path: crates/pipeline/src/destination.rs
//! The destination-side capability the `sync` engine drives:
//! building, broadcasting, and confirming the three transaction shapes, with
//! "already-applied" responses resolved locally rather than surfaced.

use crate::error::FatalErrorKind;
use async_trait::async_trait;
use relay_txfactory::TaskRoute;
use relay_types::{BlockHeader, StateRoot};

/// The chain this relayer direction writes to.
#[async_trait]
pub trait DestinationChain: Send + Sync {
    /// Builds, broadcasts, and confirms a header-sync transaction for
    /// `header`. A no-op if the factory reports the header is already
    /// synced.
    async fn commit_header(&self, header: &BlockHeader) -> Result<(), FatalErrorKind>;

    /// Builds, broadcasts, and confirms a state-root-sync transaction for
    /// `root`. A no-op if already synced.
    async fn commit_state_root(&self, root: &StateRoot) -> Result<(), FatalErrorKind>;

    /// Builds, broadcasts, and confirms a task-specific state-sync
    /// transaction. A no-op on any recognised idempotency signal.
    #[allow(clippy::too_many_arguments)]
    async fn commit_task(
        &self,
        route: &TaskRoute,
        block_index: u32,
        txid: [u8; 32],
        txproof: &[u8],
        root_index: u32,
        stateproof: &[u8],
    ) -> Result<(), FatalErrorKind>;
}
