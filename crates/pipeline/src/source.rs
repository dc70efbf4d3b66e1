// Path: crates/pipeline/src/source.rs
//! The source-side capability the `sync` engine drives: block
//! ingestion, verified-root lookup, and state-proof fetching, abstracted
//! over which physical chain plays the source role. Grounded on the
//! teacher's `LightClient` trait (`services/src/ibc/light_clients/mod.rs`):
//! one algorithm, swapped per-chain implementations.

use crate::error::FatalErrorKind;
use async_trait::async_trait;
use relay_api::RpcError;
use relay_proof::NodeHash;
use relay_types::{BlockHeader, StateRoot, TaskBatch};

/// The chain this relayer direction reads from.
#[async_trait]
pub trait SourceChain: Send + Sync {
    /// The current chain height (one past the highest produced index), used
    /// to detect the "caught up" condition.
    async fn head(&self) -> Result<u32, RpcError>;

    /// Fetches block `index`, decodes every inspectable notification/log
    /// into tasks, and computes `is_joint` against `prev_header`. Returns
    /// `None` if the block does not exist yet.
    async fn fetch_batch(
        &self,
        index: u32,
        prev_header: Option<&BlockHeader>,
    ) -> Result<Option<TaskBatch>, FatalErrorKind>;

    /// Obtains a verified state root with `index ≥ want`, clamped up to `verified_root_start` and
    /// scanned forward up to [`relay_types::constants::MAX_STATE_ROOT_GET_RANGE`]
    /// heights. `caught_up` governs whether a transient fetch failure
    /// retries (caught up) or is fatal (backfilling).
    async fn verified_state_root(
        &self,
        want: u32,
        verified_root_start: u32,
        caught_up: bool,
    ) -> Result<StateRoot, FatalErrorKind>;

    /// Fetches an opaque state-inclusion proof for `key` under `contract`
    /// at `root_hash`.
    async fn state_proof(&self, root_hash: [u8; 32], contract: [u8; 20], key: &[u8]) -> Result<Vec<u8>, RpcError>;

    /// The Merkle node-hash kind used to prove transaction inclusion in
    /// this chain's blocks.
    fn node_hash(&self) -> NodeHash;

    /// Whether `batch` requires a header-sync transaction. Direction
    /// specific: the minter's source (main chain) triggers on jointness or
    /// tasks, the withdrawer's source (side chain) only on tasks (Open
    /// Question 1; resolved in DESIGN.md).
    fn needs_header_sync(&self, batch: &TaskBatch) -> bool;
}
