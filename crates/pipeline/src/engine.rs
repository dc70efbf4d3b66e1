// Path: crates/pipeline/src/engine.rs
//! `sync(batch)`: the dependency-ordered commit algorithm shared by
//! both relayer directions. Header first, then state root, then per-task
//! state proofs, each confirmed on-chain before the next is built.

use crate::destination::DestinationChain;
use crate::error::FatalErrorKind;
use crate::source::SourceChain;
use relay_proof::prove;
use relay_txfactory::route;
use relay_types::TaskBatch;

/// Runs the three ordered phases of `sync` against `batch`. `caught_up` and
/// `verified_root_start` are threaded through to [`SourceChain::verified_state_root`]
/// unchanged from the outer loop's own state.
pub async fn sync(
    batch: &TaskBatch,
    source: &impl SourceChain,
    destination: &impl DestinationChain,
    main_bridge: [u8; 20],
    side_bridge: [u8; 20],
    verified_root_start: u32,
    caught_up: bool,
) -> Result<(), FatalErrorKind> {
    // Phase 1: header.
    if source.needs_header_sync(batch) {
        destination.commit_header(&batch.header).await?;
    }

    if batch.tasks.is_empty() {
        return Ok(());
    }

    // Phase 2: state root.
    let root = source.verified_state_root(batch.block_index, verified_root_start, caught_up).await?;
    destination.commit_state_root(&root).await?;

    // Phase 3: per-task state sync, in source event order.
    for task in &batch.tasks {
        let task_route = route(task, main_bridge, side_bridge);
        let target_index = batch.tx_ids.iter().position(|id| *id == task.source_tx_id()).ok_or_else(|| {
            FatalErrorKind::Internal(format!(
                "task {} source_tx_id not found in its own batch's tx_ids",
                task.tag()
            ))
        })?;
        let proof = prove(&batch.tx_ids, target_index, source.node_hash())?;
        let txproof = proof.to_bytes();
        let stateproof =
            source.state_proof(root.root_hash, task_route.source_contract, &task_route.key).await?;
        destination
            .commit_task(&task_route, batch.block_index, task.source_tx_id(), &txproof, root.index, &stateproof)
            .await?;
        relay_telemetry::metrics().inc_tasks_emitted(task.tag());
    }

    Ok(())
}
