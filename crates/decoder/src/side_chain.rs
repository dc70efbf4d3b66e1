// Path: crates/decoder/src/side_chain.rs
//! Decodes side-chain transaction receipts into `Burn` tasks.

use crate::error::DecodeError;
use relay_crypto::algorithms::hash::keccak256;
use relay_types::constants::MIN_WITHDRAW_VALUE;
use relay_types::{LogRecord, Receipt, Task};

/// Classifies side-chain receipts into `Burn` tasks, given the deployed
/// bridge contract's address.
pub struct SideChainDecoder {
    bridge_address: [u8; 20],
    burn_topic: [u8; 32],
}

impl SideChainDecoder {
    /// Builds a decoder bound to `bridge_address`.
    pub fn new(bridge_address: [u8; 20]) -> Result<Self, DecodeError> {
        let burn_topic =
            keccak256(b"burn(address)").map_err(|e| DecodeError::new("burn(address)", format!("hashing selector failed: {e}")))?;
        Ok(Self { bridge_address, burn_topic })
    }

    /// Decodes every burn log in `receipt`, in order, into at most one task
    /// each. A failed transaction (`status == false`) yields no tasks.
    pub fn decode_receipt(&self, source_tx_id: [u8; 32], receipt: &Receipt) -> Result<Vec<Task>, DecodeError> {
        if !receipt.status {
            return Ok(Vec::new());
        }
        let mut tasks = Vec::new();
        for log in &receipt.logs {
            if log.removed {
                continue;
            }
            if log.address != self.bridge_address {
                continue;
            }
            if log.topic0() != Some(&self.burn_topic) {
                continue;
            }
            if let Some(task) = decode_burn(source_tx_id, log)? {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }
}

fn decode_burn(source_tx_id: [u8; 32], log: &LogRecord) -> Result<Option<Task>, DecodeError> {
    let [_topic0, to_topic, burn_id_topic] = match log.topics.as_slice() {
        [a, b, c] => [a, b, c],
        other => return Err(DecodeError::new("burn(address)", format!("expected 3 topics, got {}", other.len()))),
    };
    let to_tail = to_topic
        .get(12..32)
        .ok_or_else(|| DecodeError::new("burn(address)", "malformed `to` topic"))?;
    let _to: [u8; 20] = to_tail.try_into().map_err(|_| DecodeError::new("burn(address)", "malformed `to` topic"))?;
    let burn_id_tail = burn_id_topic
        .get(24..32)
        .ok_or_else(|| DecodeError::new("burn(address)", "malformed burn id topic"))?;
    let burn_id_bytes: [u8; 8] =
        burn_id_tail.try_into().map_err(|_| DecodeError::new("burn(address)", "malformed burn id topic"))?;
    let burn_id = u64::from_le_bytes(burn_id_bytes);

    if log.data.len() > 16 {
        return Err(DecodeError::new("burn(address)", "amount field too wide"));
    }
    let mut amount_bytes = [0u8; 16];
    let offset = 16 - log.data.len();
    let dest = amount_bytes
        .get_mut(offset..)
        .ok_or_else(|| DecodeError::new("burn(address)", "amount field too wide"))?;
    dest.copy_from_slice(&log.data);
    let amount = u128::from_be_bytes(amount_bytes);

    if amount < MIN_WITHDRAW_VALUE as u128 {
        return Ok(None);
    }
    Ok(Some(Task::Burn { source_tx_id, burn_id }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRIDGE: [u8; 20] = [2u8; 20];

    fn topic_for_address(addr: [u8; 20]) -> [u8; 32] {
        let mut topic = [0u8; 32];
        topic[12..32].copy_from_slice(&addr);
        topic
    }

    fn topic_for_burn_id(id: u64) -> [u8; 32] {
        let mut topic = [0u8; 32];
        topic[24..32].copy_from_slice(&id.to_le_bytes());
        topic
    }

    fn burn_log(amount: u128) -> LogRecord {
        let decoder = SideChainDecoder::new(BRIDGE).unwrap();
        LogRecord {
            address: BRIDGE,
            topics: vec![decoder.burn_topic, topic_for_address([3u8; 20]), topic_for_burn_id(77)],
            data: amount.to_be_bytes().to_vec(),
            removed: false,
        }
    }

    #[test]
    fn burn_at_threshold_emits_task() {
        let decoder = SideChainDecoder::new(BRIDGE).unwrap();
        let receipt = Receipt { status: true, logs: vec![burn_log(MIN_WITHDRAW_VALUE as u128)] };
        let tasks = decoder.decode_receipt([9u8; 32], &receipt).unwrap();
        assert_eq!(tasks, vec![Task::Burn { source_tx_id: [9u8; 32], burn_id: 77 }]);
    }

    #[test]
    fn burn_below_threshold_is_dropped_not_fatal() {
        let decoder = SideChainDecoder::new(BRIDGE).unwrap();
        let receipt = Receipt { status: true, logs: vec![burn_log(MIN_WITHDRAW_VALUE as u128 - 1)] };
        let tasks = decoder.decode_receipt([9u8; 32], &receipt).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn failed_transaction_emits_no_tasks() {
        let decoder = SideChainDecoder::new(BRIDGE).unwrap();
        let receipt = Receipt { status: false, logs: vec![burn_log(MIN_WITHDRAW_VALUE as u128)] };
        let tasks = decoder.decode_receipt([9u8; 32], &receipt).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn removed_log_is_skipped() {
        let decoder = SideChainDecoder::new(BRIDGE).unwrap();
        let mut log = burn_log(MIN_WITHDRAW_VALUE as u128);
        log.removed = true;
        let receipt = Receipt { status: true, logs: vec![log] };
        let tasks = decoder.decode_receipt([9u8; 32], &receipt).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn log_from_other_contract_is_ignored() {
        let decoder = SideChainDecoder::new(BRIDGE).unwrap();
        let mut log = burn_log(MIN_WITHDRAW_VALUE as u128);
        log.address = [9u8; 20];
        let receipt = Receipt { status: true, logs: vec![log] };
        let tasks = decoder.decode_receipt([9u8; 32], &receipt).unwrap();
        assert!(tasks.is_empty());
    }
}
