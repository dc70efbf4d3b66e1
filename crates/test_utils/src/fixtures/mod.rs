//! Builders for the relayer's source-chain data model, with sensible
//! defaults so a test only sets the fields it cares about.

use relay_types::block::Witness;
use relay_types::{
    ApplicationLog, BlockHeader, Execution, LogRecord, NotificationEvent, Receipt, SourceBlock,
    StackItem, StateRoot, Trigger, VmState,
};

/// Builds a header at `index`. `next_consensus` drives joint-block
/// detection (`Some` for main-chain headers, `None` for EVM ones).
pub fn header(index: u32, next_consensus: Option<[u8; 20]>) -> BlockHeader {
    BlockHeader {
        version: 0,
        prev_hash: [0u8; 32],
        merkle_root: [0u8; 32],
        timestamp: u64::from(index) * 15,
        nonce: 0,
        index,
        primary_index: 0,
        next_consensus,
        witness: Witness::default(),
    }
}

/// Builds a source block at `index` with `tx_ids`, joint if `next_consensus`
/// is `Some`.
pub fn source_block(index: u32, next_consensus: Option<[u8; 20]>, tx_ids: Vec<[u8; 32]>) -> SourceBlock {
    SourceBlock { header: header(index, next_consensus), tx_ids }
}

/// Builds a single-execution, `Halt`-terminated application log carrying
/// `notifications` for `tx_id`.
pub fn application_log(tx_id: [u8; 32], notifications: Vec<NotificationEvent>) -> ApplicationLog {
    ApplicationLog {
        tx_id,
        executions: vec![Execution { trigger: Trigger::Application, vm_state: VmState::Halt, notifications }],
    }
}

/// Builds a faulted application log (no inspectable notifications).
pub fn faulted_application_log(tx_id: [u8; 32]) -> ApplicationLog {
    ApplicationLog {
        tx_id,
        executions: vec![Execution { trigger: Trigger::Application, vm_state: VmState::Fault, notifications: vec![] }],
    }
}

/// Builds an `OnDeposited`-shaped notification from `bridge`:
/// `(request_id, from, amount, to)`, matching `relay-decoder`'s expected
/// item order.
pub fn deposit_notification(bridge: [u8; 20], request_id: u64, from: [u8; 20], amount: u64, to: [u8; 20]) -> NotificationEvent {
    NotificationEvent {
        script_hash: bridge,
        name: "OnDeposited".into(),
        items: vec![
            StackItem::Integer(request_id.into()),
            StackItem::ByteArray(from.to_vec()),
            StackItem::Integer(amount.into()),
            StackItem::ByteArray(to.to_vec()),
        ],
    }
}

/// Builds a state root at `index`; `verified` controls whether a
/// non-empty witness list is attached.
pub fn state_root(index: u32, verified: bool) -> StateRoot {
    StateRoot {
        version: 0,
        index,
        root_hash: [index as u8; 32],
        witnesses: if verified { vec![vec![1]] } else { vec![] },
    }
}

/// Builds a successful receipt carrying `logs`.
pub fn receipt(logs: Vec<LogRecord>) -> Receipt {
    Receipt { status: true, logs }
}

/// Builds a failed receipt (no inspectable logs).
pub fn failed_receipt() -> Receipt {
    Receipt { status: false, logs: vec![] }
}

/// Builds a log record with `topic0` as the event selector.
pub fn log_record(address: [u8; 20], topic0: [u8; 32], data: Vec<u8>) -> LogRecord {
    LogRecord { address, topics: vec![topic0], data, removed: false }
}

/// Builds a `burn(address)`-shaped log record, matching the topic layout
/// `relay-decoder`'s side-chain decoder expects: `(selector, to, burn_id)`
/// topics plus a big-endian amount in `data`.
pub fn burn_log_record(address: [u8; 20], burn_topic: [u8; 32], to: [u8; 20], burn_id: u64, amount: u128) -> LogRecord {
    let mut to_topic = [0u8; 32];
    to_topic[12..32].copy_from_slice(&to);
    let mut burn_id_topic = [0u8; 32];
    burn_id_topic[24..32].copy_from_slice(&burn_id.to_le_bytes());
    LogRecord {
        address,
        topics: vec![burn_topic, to_topic, burn_id_topic],
        data: amount.to_be_bytes().to_vec(),
        removed: false,
    }
}
