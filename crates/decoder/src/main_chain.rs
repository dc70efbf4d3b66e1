// Path: crates/decoder/src/main_chain.rs
//! Decodes main-chain application-log notifications into tasks.

use crate::error::DecodeError;
use relay_crypto::signing::neo::validate_compressed_point;
use relay_types::constants::{MINT_THRESHOLD, ROLE_MANAGEMENT_CONTRACT, STATE_VALIDATOR_ROLE};
use relay_types::{ApplicationLog, NotificationEvent, StackItem, Task};

/// Classifies main-chain notifications into tasks, given the deployed
/// bridge contract's script hash.
pub struct MainChainDecoder {
    bridge_contract: [u8; 20],
}

impl MainChainDecoder {
    /// Builds a decoder bound to `bridge_contract`.
    pub fn new(bridge_contract: [u8; 20]) -> Self {
        Self { bridge_contract }
    }

    /// Decodes every inspectable notification in `log`, in order, into at
    /// most one task each.
    pub fn decode_log(&self, log: &ApplicationLog) -> Result<Vec<Task>, DecodeError> {
        let mut tasks = Vec::new();
        for note in log.inspectable_notifications() {
            if let Some(task) = self.decode_notification(log.tx_id, note)? {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    fn decode_notification(
        &self,
        tx_id: [u8; 32],
        note: &NotificationEvent,
    ) -> Result<Option<Task>, DecodeError> {
        if note.script_hash == self.bridge_contract && note.name == "OnDeposited" {
            return decode_deposit(tx_id, note);
        }
        if note.script_hash == self.bridge_contract && note.name == "OnValidatorsChanged" {
            decode_validators_designate(note)?;
            return Ok(Some(Task::ValidatorsDesignate { source_tx_id: tx_id }));
        }
        if note.script_hash == ROLE_MANAGEMENT_CONTRACT && note.name == "Designation" {
            return decode_state_validators_change(tx_id, note);
        }
        Ok(None)
    }
}

fn decode_deposit(tx_id: [u8; 32], note: &NotificationEvent) -> Result<Option<Task>, DecodeError> {
    let [request_id, from, amount, _to] = match note.items.as_slice() {
        [a, b, c, d] => [a, b, c, d],
        other => {
            return Err(DecodeError::new("OnDeposited", format!("expected 4 items, got {}", other.len())))
        }
    };
    let request_id = request_id
        .as_integer()
        .ok_or_else(|| DecodeError::new("OnDeposited", "request_id is not an integer"))?;
    let request_id: u64 = u64::try_from(request_id)
        .map_err(|_| DecodeError::new("OnDeposited", "request_id does not fit in u64"))?;
    let from_bytes = from
        .as_bytes()
        .ok_or_else(|| DecodeError::new("OnDeposited", "from is not a byte array"))?;
    if from_bytes.len() != 20 {
        return Err(DecodeError::new("OnDeposited", format!("from must be 20 bytes, got {}", from_bytes.len())));
    }
    let amount = amount
        .as_integer()
        .ok_or_else(|| DecodeError::new("OnDeposited", "amount is not an integer"))?;
    let amount: u64 = u64::try_from(amount)
        .map_err(|_| DecodeError::new("OnDeposited", "amount does not fit in u64"))?;

    // `_to` is deliberately unchecked beyond item-count/shape: its value
    // flows straight through the destination contract's own bookkeeping.
    if amount < MINT_THRESHOLD {
        return Ok(None);
    }
    Ok(Some(Task::Deposit { source_tx_id: tx_id, request_id }))
}

fn decode_validators_designate(note: &NotificationEvent) -> Result<(), DecodeError> {
    let array = match note.items.as_slice() {
        [StackItem::Array(items)] => items,
        [single] => {
            return match single.as_array() {
                Some(items) => validate_pubkeys(items),
                None => Err(DecodeError::new("OnValidatorsChanged", "expected a single array argument")),
            }
        }
        other => {
            return Err(DecodeError::new(
                "OnValidatorsChanged",
                format!("expected 1 item, got {}", other.len()),
            ))
        }
    };
    validate_pubkeys(array)
}

fn validate_pubkeys(items: &[StackItem]) -> Result<(), DecodeError> {
    for item in items {
        let bytes = item
            .as_bytes()
            .ok_or_else(|| DecodeError::new("OnValidatorsChanged", "pubkey entry is not a byte array"))?;
        validate_compressed_point(bytes)
            .map_err(|e| DecodeError::new("OnValidatorsChanged", format!("invalid pubkey point: {e}")))?;
    }
    Ok(())
}

fn decode_state_validators_change(
    tx_id: [u8; 32],
    note: &NotificationEvent,
) -> Result<Option<Task>, DecodeError> {
    let [role, index] = match note.items.as_slice() {
        [a, b] => [a, b],
        other => {
            return Err(DecodeError::new("Designation", format!("expected 2 items, got {}", other.len())))
        }
    };
    let role = role.as_integer().ok_or_else(|| DecodeError::new("Designation", "role is not an integer"))?;
    let index = index.as_integer().ok_or_else(|| DecodeError::new("Designation", "index is not an integer"))?;
    if role != STATE_VALIDATOR_ROLE {
        return Ok(None);
    }
    let index: u32 = u32::try_from(index).map_err(|_| DecodeError::new("Designation", "index does not fit in u32"))?;
    Ok(Some(Task::StateValidatorsChange { source_tx_id: tx_id, index }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_types::{Execution, Trigger, VmState};

    const BRIDGE: [u8; 20] = [1u8; 20];

    fn log_with(name: &str, script_hash: [u8; 20], items: Vec<StackItem>) -> ApplicationLog {
        ApplicationLog {
            tx_id: [9u8; 32],
            executions: vec![Execution {
                trigger: Trigger::Application,
                vm_state: VmState::Halt,
                notifications: vec![NotificationEvent { script_hash, name: name.into(), items }],
            }],
        }
    }

    #[test]
    fn deposit_below_threshold_is_dropped_not_fatal() {
        let log = log_with(
            "OnDeposited",
            BRIDGE,
            vec![
                StackItem::Integer(7),
                StackItem::ByteArray(vec![0u8; 20]),
                StackItem::Integer(99_999_999),
                StackItem::ByteArray(vec![0u8; 20]),
            ],
        );
        let decoder = MainChainDecoder::new(BRIDGE);
        let tasks = decoder.decode_log(&log).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn deposit_at_threshold_emits_task() {
        let log = log_with(
            "OnDeposited",
            BRIDGE,
            vec![
                StackItem::Integer(7),
                StackItem::ByteArray(vec![0u8; 20]),
                StackItem::Integer(100_000_000),
                StackItem::ByteArray(vec![0u8; 20]),
            ],
        );
        let decoder = MainChainDecoder::new(BRIDGE);
        let tasks = decoder.decode_log(&log).unwrap();
        assert_eq!(tasks, vec![Task::Deposit { source_tx_id: [9u8; 32], request_id: 7 }]);
    }

    #[test]
    fn malformed_deposit_is_fatal() {
        let log = log_with("OnDeposited", BRIDGE, vec![StackItem::Integer(7)]);
        let decoder = MainChainDecoder::new(BRIDGE);
        assert!(decoder.decode_log(&log).is_err());
    }

    #[test]
    fn designation_ignores_non_state_validator_role() {
        let log = log_with(
            "Designation",
            ROLE_MANAGEMENT_CONTRACT,
            vec![StackItem::Integer(1), StackItem::Integer(41)],
        );
        let decoder = MainChainDecoder::new(BRIDGE);
        let tasks = decoder.decode_log(&log).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn designation_with_state_validator_role_emits_task() {
        let log = log_with(
            "Designation",
            ROLE_MANAGEMENT_CONTRACT,
            vec![StackItem::Integer(STATE_VALIDATOR_ROLE), StackItem::Integer(41)],
        );
        let decoder = MainChainDecoder::new(BRIDGE);
        let tasks = decoder.decode_log(&log).unwrap();
        assert_eq!(tasks, vec![Task::StateValidatorsChange { source_tx_id: [9u8; 32], index: 41 }]);
    }
}
