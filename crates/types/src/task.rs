// Path: crates/types/src/task.rs
//! Decoded tasks and task batches.
//!
//! The decoder's output is a closed sum type. Only the source transaction id
//! is common to every variant; everything else is task-specific, so this is
//! modelled as a plain enum rather than a trait object.

use crate::block::BlockHeader;
use serde::{Deserialize, Serialize};

/// A decoded, typed intent derived from a single source event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// main→side deposit, above [`crate::constants::MINT_THRESHOLD`].
    Deposit {
        /// The source transaction id that yielded this task.
        source_tx_id: [u8; 32],
        /// The bridge-assigned request id.
        request_id: u64,
    },
    /// main→side validator-set rotation notice.
    ValidatorsDesignate {
        /// The source transaction id that yielded this task.
        source_tx_id: [u8; 32],
    },
    /// main→side state-validator committee rotation.
    StateValidatorsChange {
        /// The source transaction id that yielded this task.
        source_tx_id: [u8; 32],
        /// The new state-validator designation index.
        index: u32,
    },
    /// side→main withdrawal, above [`crate::constants::MIN_WITHDRAW_VALUE`].
    Burn {
        /// The source transaction id that yielded this task.
        source_tx_id: [u8; 32],
        /// The bridge-assigned burn id.
        burn_id: u64,
    },
}

impl Task {
    /// The source transaction id that yielded this task; common to every variant.
    pub fn source_tx_id(&self) -> [u8; 32] {
        match self {
            Task::Deposit { source_tx_id, .. }
            | Task::ValidatorsDesignate { source_tx_id }
            | Task::StateValidatorsChange { source_tx_id, .. }
            | Task::Burn { source_tx_id, .. } => *source_tx_id,
        }
    }

    /// A short, stable tag for logging and metrics.
    pub fn tag(&self) -> &'static str {
        match self {
            Task::Deposit { .. } => "deposit",
            Task::ValidatorsDesignate { .. } => "validators_designate",
            Task::StateValidatorsChange { .. } => "state_validators_change",
            Task::Burn { .. } => "burn",
        }
    }
}

/// All tasks plus metadata belonging to one source block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBatch {
    /// The source block this batch was derived from.
    pub block_index: u32,
    /// The block header, cached so `sync` need not re-fetch it.
    pub header: BlockHeader,
    /// Whether this block is a joint block.
    pub is_joint: bool,
    /// Tasks extracted from this block, in source event order.
    pub tasks: Vec<Task>,
    /// Transaction ids in block order, the Merkle-proof leaf set for every
    /// task's `source_tx_id` in this batch.
    pub tx_ids: Vec<[u8; 32]>,
}

impl TaskBatch {
    /// Whether this batch requires a header-sync transaction for the minter
    /// direction: joint blocks always propagate their header, even with no
    /// tasks, so the destination can eventually verify future state roots.
    pub fn needs_header_sync_joint_or_tasks(&self) -> bool {
        self.is_joint || !self.tasks.is_empty()
    }

    /// Whether this batch requires a header-sync transaction for the
    /// withdrawer direction, where only tasks (not jointness) trigger it:
    /// the main chain only needs its header synced when there is a task
    /// whose proof will be checked against it.
    pub fn needs_header_sync_tasks_only(&self) -> bool {
        !self.tasks.is_empty()
    }
}
