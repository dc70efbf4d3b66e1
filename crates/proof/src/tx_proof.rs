// Path: crates/proof/src/tx_proof.rs
//! Merkle transaction-inclusion proofs.
//!
//! Leaves are transaction hashes in block order. Inner nodes hash
//! `left ∥ right`; odd-width levels duplicate their last node before
//! pairing. `path`'s *i*-th bit records which side of its pair the target
//! node sits on at level *i*: 1 when the target is the right child (its
//! sibling is folded in on the left), 0 when the target is the left child.

use crate::error::ProofError;
use relay_crypto::algorithms::hash::{keccak256, sha256d};

/// Which chain's node-hash function a proof was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeHash {
    /// Double-SHA-256, the main chain's node hash.
    MainChain,
    /// Keccak-256, the side chain's node hash.
    SideChain,
}

impl NodeHash {
    fn hash(self, data: &[u8]) -> Result<[u8; 32], ProofError> {
        match self {
            NodeHash::MainChain => Ok(sha256d(data)?),
            NodeHash::SideChain => Ok(keccak256(data)?),
        }
    }

    fn pair(self, left: [u8; 32], right: [u8; 32]) -> Result<[u8; 32], ProofError> {
        let mut buf = Vec::with_capacity(64);
        buf.extend_from_slice(&left);
        buf.extend_from_slice(&right);
        self.hash(&buf)
    }
}

/// A Merkle transaction-inclusion proof.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxProof {
    /// Level-*i* bit: 0 if the sibling at that level is to the left, 1 if to the right.
    pub path: u32,
    /// Sibling hashes, leaf level to root level.
    pub siblings: Vec<[u8; 32]>,
}

impl TxProof {
    /// Serialises as `u32-le(path) ∥ concat(siblings)`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(4 + self.siblings.len() * 32);
        out.extend_from_slice(&self.path.to_le_bytes());
        for sibling in &self.siblings {
            out.extend_from_slice(sibling);
        }
        out
    }
}

/// Builds a Merkle inclusion proof for `leaves[target_index]`.
pub fn prove(leaves: &[[u8; 32]], target_index: usize, hasher: NodeHash) -> Result<TxProof, ProofError> {
    if leaves.is_empty() {
        return Err(ProofError::EmptyLeafSet);
    }
    if target_index >= leaves.len() {
        return Err(ProofError::TargetOutOfRange { index: target_index, len: leaves.len() });
    }

    let mut level: Vec<[u8; 32]> = leaves.to_vec();
    let mut index = target_index;
    let mut path: u32 = 0;
    let mut siblings = Vec::new();
    let mut depth: u32 = 0;

    while level.len() > 1 {
        if depth >= 32 {
            return Err(ProofError::TooManyLevels);
        }
        let mut widened = level.clone();
        if widened.len() % 2 == 1 {
            let last = *widened
                .last()
                .ok_or_else(|| ProofError::Internal("level emptied unexpectedly during padding".into()))?;
            widened.push(last);
        }

        let sibling_index = index ^ 1;
        let sibling = *widened
            .get(sibling_index)
            .ok_or_else(|| ProofError::Internal("sibling index out of range after padding".into()))?;
        siblings.push(sibling);
        // `index` odd ⇒ the current node is the right child of its pair, so
        // the sibling sits to its left; this is what the path bit records.
        if index & 1 == 1 {
            path |= 1 << depth;
        }

        let mut next_level = Vec::with_capacity(widened.len() / 2);
        for pair in widened.chunks(2) {
            if let [left, right] = pair {
                next_level.push(hasher.pair(*left, *right)?);
            }
        }
        level = next_level;
        index /= 2;
        depth += 1;
    }

    Ok(TxProof { path, siblings })
}

/// Recomputes the root from `leaf`, `proof.siblings`, and `proof.path`, and
/// compares it against `root`.
pub fn verify(root: [u8; 32], leaf: [u8; 32], proof: &TxProof, hasher: NodeHash) -> Result<bool, ProofError> {
    let mut current = leaf;
    for (depth, sibling) in proof.siblings.iter().enumerate() {
        let bit = (proof.path >> depth) & 1;
        current = if bit == 1 {
            hasher.pair(*sibling, current)?
        } else {
            hasher.pair(current, *sibling)?
        };
    }
    Ok(current == root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn four_leaf_proof_matches_spec_example() {
        let leaves = [leaf(1), leaf(2), leaf(3), leaf(4)];
        let proof = prove(&leaves, 3, NodeHash::MainChain).unwrap();
        assert_eq!(proof.path, 0b11);
        let h12 = NodeHash::MainChain.pair(leaves[0], leaves[1]).unwrap();
        assert_eq!(proof.siblings, vec![leaves[2], h12]);

        let h34 = NodeHash::MainChain.pair(leaves[2], leaves[3]).unwrap();
        let root = NodeHash::MainChain.pair(h12, h34).unwrap();
        assert!(verify(root, leaves[3], &proof, NodeHash::MainChain).unwrap());
    }

    #[test]
    fn odd_width_level_duplicates_last_node() {
        let leaves = [leaf(1), leaf(2), leaf(3)];
        let proof = prove(&leaves, 2, NodeHash::SideChain).unwrap();
        let root_leaves = {
            let h12 = NodeHash::SideChain.pair(leaves[0], leaves[1]).unwrap();
            let h33 = NodeHash::SideChain.pair(leaves[2], leaves[2]).unwrap();
            NodeHash::SideChain.pair(h12, h33).unwrap()
        };
        assert!(verify(root_leaves, leaves[2], &proof, NodeHash::SideChain).unwrap());
    }

    #[test]
    fn single_leaf_proof_is_trivial() {
        let leaves = [leaf(9)];
        let proof = prove(&leaves, 0, NodeHash::MainChain).unwrap();
        assert!(proof.siblings.is_empty());
        assert!(verify(leaves[0], leaves[0], &proof, NodeHash::MainChain).unwrap());
    }

    #[test]
    fn empty_leaf_set_is_rejected() {
        assert!(matches!(prove(&[], 0, NodeHash::MainChain), Err(ProofError::EmptyLeafSet)));
    }

    #[test]
    fn out_of_range_target_is_rejected() {
        let leaves = [leaf(1), leaf(2)];
        assert!(matches!(
            prove(&leaves, 5, NodeHash::MainChain),
            Err(ProofError::TargetOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn tampered_sibling_fails_verification() {
        let leaves = [leaf(1), leaf(2), leaf(3), leaf(4)];
        let proof = prove(&leaves, 3, NodeHash::MainChain).unwrap();
        let h12 = NodeHash::MainChain.pair(leaves[0], leaves[1]).unwrap();
        let h34 = NodeHash::MainChain.pair(leaves[2], leaves[3]).unwrap();
        let root = NodeHash::MainChain.pair(h12, h34).unwrap();

        let mut tampered = proof;
        tampered.siblings[0] = leaf(0xff);
        assert!(!verify(root, leaves[3], &tampered, NodeHash::MainChain).unwrap());
    }
}
