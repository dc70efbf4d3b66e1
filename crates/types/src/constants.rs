// Path: crates/types/src/constants.rs
//! Well-known constants shared by the decoder, transaction factory, and
//! relay pipeline. Values are fixed by the destination contracts'
//! deployed storage layout and must not be changed independently.

/// Minimum `amount` for a `Deposit` task to be emitted.
pub const MINT_THRESHOLD: u64 = 100_000_000;
/// Minimum `amount` for a `Burn` task to be emitted. Equal to [`MINT_THRESHOLD`].
pub const MIN_WITHDRAW_VALUE: u64 = MINT_THRESHOLD;
/// Approximate source block time, used to throttle polling.
pub const BLOCK_TIME_SECONDS: u64 = 15;
/// Upper bound on the number of heights scanned while searching for a
/// verified state root before giving up.
pub const MAX_STATE_ROOT_GET_RANGE: u32 = 57_600;
/// The role-management role id that designates a state-validator committee member.
pub const STATE_VALIDATOR_ROLE: i64 = 4;
/// MPT key prefix for `Deposit` tasks.
pub const DEPOSIT_PREFIX: u8 = 0x01;
/// MPT key prefix for `ValidatorsDesignate` tasks.
pub const VALIDATORS_KEY: u8 = 0x03;
/// MPT key prefix for `StateValidatorsChange` tasks.
pub const STATE_VALIDATORS_CHANGE_PREFIX: u8 = 0x04;
/// MPT key prefix for `Burn` tasks.
pub const BURN_PREFIX: u8 = 0x06;
/// The fixed 20-byte address of the role-management native contract.
pub const ROLE_MANAGEMENT_CONTRACT: [u8; 20] = [
    0x49, 0xcf, 0x4e, 0x53, 0x78, 0xff, 0xcd, 0x4d, 0xec, 0x03, 0x4f, 0xd9, 0x8a, 0x17, 0x4c, 0x54,
    0x91, 0xe3, 0x95, 0xe2,
];
/// Commit-protocol retry budget: rounds.
pub const COMMIT_ROUNDS: u32 = 10;
/// Commit-protocol retry budget: sleep per round.
pub const COMMIT_ROUND_SLEEP_SECONDS: u64 = 15;
/// NEO-style `valid_until_block` horizon added to the current height.
pub const VALID_UNTIL_BLOCK_HORIZON: u32 = 240;

/// Substring-matched destination error signals that are recovered locally
/// rather than treated as fatal. Order is insignificant; matching
/// is "does the error message contain this substring", case-sensitive.
pub const IDEMPOTENCY_SIGNALS: &[&str] = &[
    "already synced",
    "already exists",
    "already minted",
    "already withdrawed",
    "synced validators outdated",
];

/// Returns true if `message` contains any of the [`IDEMPOTENCY_SIGNALS`].
pub fn is_idempotent_skip(message: &str) -> bool {
    IDEMPOTENCY_SIGNALS.iter().any(|signal| message.contains(signal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_each_signal() {
        for signal in IDEMPOTENCY_SIGNALS {
            assert!(is_idempotent_skip(&format!("execution reverted: {signal}")));
        }
    }

    #[test]
    fn rejects_unrelated_messages() {
        assert!(!is_idempotent_skip("insufficient balance"));
    }
}
