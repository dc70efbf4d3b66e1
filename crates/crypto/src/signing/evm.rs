// Path: crates/crypto/src/signing/evm.rs
//! secp256k1 ECDSA signing for EIP-155 legacy transactions.

use crate::error::CryptoError;
use k256::ecdsa::{signature::hazmat::PrehashSigner, RecoveryId, Signature, SigningKey};

/// An EVM relayer key, wrapping a secp256k1 signing key.
pub struct EvmSigner {
    key: SigningKey,
}

/// An EIP-155 signature: recovery id plus `(r, s)`, sized for RLP encoding.
pub struct EvmSignature {
    /// The EIP-155 `v` parity bit (0 or 1; the caller folds in `chain_id`).
    pub recovery_id: u8,
    /// The 32-byte `r` component.
    pub r: [u8; 32],
    /// The 32-byte `s` component.
    pub s: [u8; 32],
}

impl EvmSigner {
    /// Loads a signer from a 32-byte secp256k1 private key.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let key = SigningKey::from_bytes(bytes.into())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self { key })
    }

    /// Signs a 32-byte digest (the Keccak-256 hash of the RLP-encoded,
    /// unsigned transaction per EIP-155) and returns a recoverable signature.
    pub fn sign_prehash(&self, digest: &[u8; 32]) -> Result<EvmSignature, CryptoError> {
        let (signature, recovery_id): (Signature, RecoveryId) = self
            .key
            .sign_prehash(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(EvmSignature { recovery_id: recovery_id.to_byte(), r, s })
    }

    /// The sender address this signer corresponds to, derived from the
    /// uncompressed public key's Keccak-256 hash (the last 20 bytes).
    pub fn address(&self) -> Result<[u8; 20], CryptoError> {
        let verifying_key = self.key.verifying_key();
        let uncompressed = verifying_key.to_encoded_point(false);
        let hash = crate::algorithms::hash::keccak256(&uncompressed.as_bytes()[1..])?;
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&hash[12..]);
        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_and_derives_address() {
        let signer = EvmSigner::from_bytes(&[7u8; 32]).unwrap();
        let digest = crate::algorithms::hash::keccak256(b"test payload").unwrap();
        let sig = signer.sign_prehash(&digest).unwrap();
        assert!(sig.recovery_id <= 1);
        let addr = signer.address().unwrap();
        assert_ne!(addr, [0u8; 20]);
    }
}
