// Path: crates/types/src/block.rs
//! Source block headers and blocks.

use serde::{Deserialize, Serialize};

/// A source-chain block header.
///
/// `next_consensus` models the NEO-style next-validator-set commitment. EVM
/// side-chain headers have no equivalent concept and carry `None`, which
/// makes [`is_joint`] evaluate to `false` for every side-chain header pair
/// without a chain-specific branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Header format version.
    pub version: u32,
    /// Hash of the previous header, or the zero hash for the genesis header.
    pub prev_hash: [u8; 32],
    /// Merkle root of this block's transaction hashes.
    pub merkle_root: [u8; 32],
    /// Header timestamp, chain-defined units.
    pub timestamp: u64,
    /// Consensus nonce.
    pub nonce: u64,
    /// Monotonic 32-bit block index.
    pub index: u32,
    /// Index of the primary consensus node that produced this block.
    pub primary_index: u8,
    /// Next-consensus (next validator set) commitment. `None` on EVM headers.
    pub next_consensus: Option<[u8; 20]>,
    /// Consensus witness: `(verification_script, invocation_script)`.
    pub witness: Witness,
}

/// A NEO-style witness pair. Empty on chains that carry no witness concept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    /// The verification script bytes.
    pub verification_script: Vec<u8>,
    /// The invocation script bytes.
    pub invocation_script: Vec<u8>,
}

/// A source block: a header plus its ordered transaction id list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceBlock {
    /// The block header.
    pub header: BlockHeader,
    /// Transaction hashes/ids in block order, used as Merkle-proof leaves.
    pub tx_ids: Vec<[u8; 32]>,
}

/// Returns whether `current`'s next-consensus commitment differs from
/// `previous`'s (or `current.index == 0`).
///
/// `previous` is `None` for the genesis header; any header at index 0 is
/// joint regardless of `previous`.
pub fn is_joint(previous: Option<&BlockHeader>, current: &BlockHeader) -> bool {
    if current.index == 0 {
        return true;
    }
    match previous {
        None => true,
        Some(prev) => prev.next_consensus != current.next_consensus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(index: u32, next_consensus: Option<[u8; 20]>) -> BlockHeader {
        BlockHeader {
            version: 0,
            prev_hash: [0; 32],
            merkle_root: [0; 32],
            timestamp: 0,
            nonce: 0,
            index,
            primary_index: 0,
            next_consensus,
            witness: Witness::default(),
        }
    }

    #[test]
    fn index_zero_is_always_joint() {
        let h = header(0, Some([1; 20]));
        assert!(is_joint(Some(&h), &h));
        assert!(is_joint(None, &h));
    }

    #[test]
    fn differing_next_consensus_is_joint() {
        let prev = header(5, Some([1; 20]));
        let cur = header(6, Some([2; 20]));
        assert!(is_joint(Some(&prev), &cur));
    }

    #[test]
    fn same_next_consensus_is_not_joint() {
        let prev = header(5, Some([1; 20]));
        let cur = header(6, Some([1; 20]));
        assert!(!is_joint(Some(&prev), &cur));
    }

    #[test]
    fn evm_headers_are_never_joint_past_genesis() {
        let prev = header(5, None);
        let cur = header(6, None);
        assert!(!is_joint(Some(&prev), &cur));
    }
}
