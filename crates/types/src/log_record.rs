// Path: crates/types/src/log_record.rs
//! Side-chain (EVM) log records and transaction receipts.

use serde::{Deserialize, Serialize};

/// A single EVM-style log entry.
///
/// `topics[0]` is the Keccak-256 event signature selector; further topics
/// are indexed arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// The emitting contract's address.
    pub address: [u8; 20],
    /// Indexed topics, `topics[0]` is the event selector.
    pub topics: Vec<[u8; 32]>,
    /// Non-indexed event data.
    pub data: Vec<u8>,
    /// Whether this log was removed by a chain reorganisation.
    pub removed: bool,
}

impl LogRecord {
    /// Returns `topics[0]`, the event selector, if present.
    pub fn topic0(&self) -> Option<&[u8; 32]> {
        self.topics.first()
    }
}

/// The receipt of a side-chain transaction, used to gate `Burn` tasks on
/// successful execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Execution status: `true` for success.
    pub status: bool,
    /// Logs emitted by this transaction, in order.
    pub logs: Vec<LogRecord>,
}
