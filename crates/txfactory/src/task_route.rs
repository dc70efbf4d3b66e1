// Path: crates/txfactory/src/task_route.rs
//! Maps a [`Task`] to the destination method name and the source-chain MPT
//! key bytes used to fetch its state proof.

use relay_types::constants::{
    BURN_PREFIX, DEPOSIT_PREFIX, ROLE_MANAGEMENT_CONTRACT, STATE_VALIDATORS_CHANGE_PREFIX, VALIDATORS_KEY,
};
use relay_types::Task;

/// The destination method name, the contract the state proof's key is
/// scoped under, and the key bytes themselves.
pub struct TaskRoute {
    /// The destination contract method this task invokes.
    pub method: &'static str,
    /// The source-chain contract the proof key is read from.
    pub source_contract: [u8; 20],
    /// The MPT key bytes.
    pub key: Vec<u8>,
}

/// Computes the route for `task`, given the deployed bridge contracts on
/// the main and side chains.
pub fn route(task: &Task, main_bridge: [u8; 20], side_bridge: [u8; 20]) -> TaskRoute {
    match *task {
        Task::Deposit { request_id, .. } => TaskRoute {
            method: "requestMint",
            source_contract: main_bridge,
            key: {
                let mut key = vec![DEPOSIT_PREFIX];
                key.extend_from_slice(&minimal_be_bytes(request_id));
                key
            },
        },
        Task::ValidatorsDesignate { .. } => {
            TaskRoute { method: "syncValidators", source_contract: main_bridge, key: vec![VALIDATORS_KEY] }
        }
        Task::StateValidatorsChange { index, .. } => TaskRoute {
            method: "syncStateRootValidatorsAddress",
            source_contract: ROLE_MANAGEMENT_CONTRACT,
            key: {
                let mut key = vec![STATE_VALIDATORS_CHANGE_PREFIX];
                key.extend_from_slice(&(index + 1).to_be_bytes());
                key
            },
        },
        Task::Burn { burn_id, .. } => TaskRoute {
            method: "withdraw",
            source_contract: side_bridge,
            key: {
                let mut key = vec![BURN_PREFIX];
                key.extend_from_slice(&burn_id.to_le_bytes());
                key
            },
        },
    }
}

/// Big-endian encoding of `value` with no leading zero bytes, except that
/// zero itself encodes as a single `0x00` byte.
fn minimal_be_bytes(value: u64) -> Vec<u8> {
    if value == 0 {
        return vec![0];
    }
    let full = value.to_be_bytes();
    let first_nonzero = full.iter().position(|&b| b != 0).unwrap_or(full.len() - 1);
    full[first_nonzero..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: [u8; 20] = [1u8; 20];
    const SIDE: [u8; 20] = [2u8; 20];

    #[test]
    fn deposit_key_matches_spec_scenario() {
        let task = Task::Deposit { source_tx_id: [0u8; 32], request_id: 7 };
        let route = route(&task, MAIN, SIDE);
        assert_eq!(route.method, "requestMint");
        assert_eq!(route.key, vec![0x01, 0x07]);
    }

    #[test]
    fn state_validators_change_key_matches_spec_scenario() {
        let task = Task::StateValidatorsChange { source_tx_id: [0u8; 32], index: 41 };
        let route = route(&task, MAIN, SIDE);
        assert_eq!(route.method, "syncStateRootValidatorsAddress");
        assert_eq!(route.source_contract, ROLE_MANAGEMENT_CONTRACT);
        assert_eq!(route.key, vec![0x04, 0x00, 0x00, 0x00, 0x2A]);
    }

    #[test]
    fn validators_designate_key_is_fixed() {
        let task = Task::ValidatorsDesignate { source_tx_id: [0u8; 32] };
        let route = route(&task, MAIN, SIDE);
        assert_eq!(route.method, "syncValidators");
        assert_eq!(route.key, vec![0x03]);
    }

    #[test]
    fn burn_key_is_little_endian() {
        let task = Task::Burn { source_tx_id: [0u8; 32], burn_id: 0x0102 };
        let route = route(&task, MAIN, SIDE);
        assert_eq!(route.method, "withdraw");
        assert_eq!(route.source_contract, SIDE);
        assert_eq!(route.key, vec![0x06, 0x02, 0x01, 0, 0, 0, 0, 0, 0]);
    }
}
