// Path: crates/txfactory/src/header_codec.rs
//! Canonical header and state-root serialisation for `syncHeader` /
//! `syncStateRoot` payloads.

use crate::compact::{write_var_bytes, Reader};
use crate::error::TxFactoryError;
use relay_crypto::algorithms::hash::sha256d;
use relay_types::{BlockHeader, StateRoot, Witness};

const ZERO_NEXT_CONSENSUS: [u8; 20] = [0u8; 20];

/// Encodes `header`'s cross-chain canonical view:
/// `version u32 ∥ prev_hash[32] ∥ merkle_root[32] ∥ timestamp u64 ∥ nonce u64
/// ∥ index u32 ∥ primary_index u8 ∥ next_consensus[20] ∥ witness`.
///
/// EVM source headers (`next_consensus = None`) encode the all-zero
/// placeholder, since the destination only inspects this field on
/// NEO-sourced headers.
pub fn encode_header(header: &BlockHeader) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&header.version.to_le_bytes());
    out.extend_from_slice(&header.prev_hash);
    out.extend_from_slice(&header.merkle_root);
    out.extend_from_slice(&header.timestamp.to_le_bytes());
    out.extend_from_slice(&header.nonce.to_le_bytes());
    out.extend_from_slice(&header.index.to_le_bytes());
    out.push(header.primary_index);
    out.extend_from_slice(&header.next_consensus.unwrap_or(ZERO_NEXT_CONSENSUS));
    encode_witness(&header.witness, &mut out);
    out
}

/// Decodes a payload produced by [`encode_header`]. `next_consensus` is
/// always recovered as `Some`; callers sourcing EVM headers should not
/// round-trip through this codec since the placeholder would be mistaken
/// for a real commitment.
pub fn decode_header(bytes: &[u8]) -> Result<BlockHeader, TxFactoryError> {
    let mut reader = Reader::new(bytes);
    let version = reader.read_u32()?;
    let prev_hash = reader.read_array::<32>()?;
    let merkle_root = reader.read_array::<32>()?;
    let timestamp = reader.read_u64()?;
    let nonce = reader.read_u64()?;
    let index = reader.read_u32()?;
    let primary_index = reader.read_u8()?;
    let next_consensus = reader.read_array::<20>()?;
    let witness = decode_witness(&mut reader)?;
    if !reader.is_empty() {
        return Err(TxFactoryError::Encoding("trailing bytes after header".into()));
    }
    Ok(BlockHeader {
        version,
        prev_hash,
        merkle_root,
        timestamp,
        nonce,
        index,
        primary_index,
        next_consensus: Some(next_consensus),
        witness,
    })
}

/// A header's identity hash: double-SHA-256 of its canonical encoding.
pub fn header_hash(header: &BlockHeader) -> Result<[u8; 32], TxFactoryError> {
    Ok(sha256d(encode_header(header))?)
}

fn encode_witness(witness: &Witness, out: &mut Vec<u8>) {
    write_var_bytes(out, &witness.verification_script);
    write_var_bytes(out, &witness.invocation_script);
}

fn decode_witness(reader: &mut Reader<'_>) -> Result<Witness, TxFactoryError> {
    let verification_script = reader.read_var_bytes()?;
    let invocation_script = reader.read_var_bytes()?;
    Ok(Witness { verification_script, invocation_script })
}

/// Encodes `root`'s canonical view: `version u8 ∥ index u32 ∥ root[32] ∥
/// single witness`. Only a single witness is carried in the payload; when
/// `root.witnesses` holds more than one (a fully verified root may carry a
/// committee's worth), the first is used.
pub fn encode_state_root(root: &StateRoot) -> Vec<u8> {
    let mut out = Vec::new();
    out.push(root.version);
    out.extend_from_slice(&root.index.to_le_bytes());
    out.extend_from_slice(&root.root_hash);
    let witness = root.witnesses.first().map(Vec::as_slice).unwrap_or(&[]);
    write_var_bytes(&mut out, witness);
    out
}

/// Decodes a payload produced by [`encode_state_root`]. The result always
/// carries at most one witness, matching the canonical payload shape.
pub fn decode_state_root(bytes: &[u8]) -> Result<StateRoot, TxFactoryError> {
    let mut reader = Reader::new(bytes);
    let version = reader.read_u8()?;
    let index = reader.read_u32()?;
    let root_hash = reader.read_array::<32>()?;
    let witness = reader.read_var_bytes()?;
    if !reader.is_empty() {
        return Err(TxFactoryError::Encoding("trailing bytes after state root".into()));
    }
    let witnesses = if witness.is_empty() { Vec::new() } else { vec![witness] };
    Ok(StateRoot { version, index, root_hash, witnesses })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header() -> BlockHeader {
        BlockHeader {
            version: 0,
            prev_hash: [1u8; 32],
            merkle_root: [2u8; 32],
            timestamp: 1_700_000_000,
            nonce: 0xdead_beef,
            index: 12_345,
            primary_index: 3,
            next_consensus: Some([9u8; 20]),
            witness: Witness {
                verification_script: vec![0x0c, 0x21],
                invocation_script: vec![0x40; 64],
            },
        }
    }

    #[test]
    fn header_round_trips_bit_exactly() {
        let header = sample_header();
        let encoded = encode_header(&header);
        let decoded = decode_header(&encoded).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn decoded_header_hash_matches_source_hash() {
        let header = sample_header();
        let encoded = encode_header(&header);
        let decoded = decode_header(&encoded).unwrap();
        assert_eq!(header_hash(&header).unwrap(), header_hash(&decoded).unwrap());
    }

    #[test]
    fn state_root_round_trips() {
        let root = StateRoot { version: 1, index: 77, root_hash: [7u8; 32], witnesses: vec![vec![1, 2, 3]] };
        let encoded = encode_state_root(&root);
        let decoded = decode_state_root(&encoded).unwrap();
        assert_eq!(decoded, root);
    }

    #[test]
    fn unverified_root_round_trips_with_empty_witness() {
        let root = StateRoot { version: 1, index: 77, root_hash: [7u8; 32], witnesses: vec![] };
        let encoded = encode_state_root(&root);
        let decoded = decode_state_root(&encoded).unwrap();
        assert_eq!(decoded, root);
    }

    #[test]
    fn truncated_header_is_rejected() {
        let header = sample_header();
        let mut encoded = encode_header(&header);
        encoded.truncate(10);
        assert!(decode_header(&encoded).is_err());
    }
}
