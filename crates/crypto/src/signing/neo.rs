// Path: crates/crypto/src/signing/neo.rs
//! secp256r1 (NIST P-256) ECDSA signing for NEO-style invocation witnesses.

use crate::error::CryptoError;
use p256::ecdsa::{signature::hazmat::PrehashSigner, Signature, SigningKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use p256::PublicKey;

/// A NEO relayer key, wrapping a secp256r1 signing key.
pub struct NeoSigner {
    key: SigningKey,
}

impl NeoSigner {
    /// Loads a signer from a 32-byte secp256r1 private key.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, CryptoError> {
        let key = SigningKey::from_bytes(bytes.into())
            .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
        Ok(Self { key })
    }

    /// Signs a message under the configured network magic: NEO signs
    /// `sha256(magic_le_u32 ∥ sha256(message))`, the digest that gets
    /// embedded in the invocation witness's invocation script.
    pub fn sign(&self, message: &[u8], network_magic: u32) -> Result<[u8; 64], CryptoError> {
        let mut scoped = Vec::with_capacity(4 + message.len());
        scoped.extend_from_slice(&network_magic.to_le_bytes());
        scoped.extend_from_slice(&crate::algorithms::hash::sha256(message)?);
        let digest = crate::algorithms::hash::sha256(&scoped)?;
        let signature: Signature = self
            .key
            .sign_prehash(&digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let bytes = signature.to_bytes();
        let mut out = [0u8; 64];
        out.copy_from_slice(&bytes);
        Ok(out)
    }

    /// The signer's compressed (33-byte) public key, as embedded in the
    /// verification script.
    pub fn compressed_public_key(&self) -> Result<[u8; 33], CryptoError> {
        let point = self.key.verifying_key().to_encoded_point(true);
        point
            .as_bytes()
            .try_into()
            .map_err(|_| CryptoError::InvalidKey("unexpected public key length".into()))
    }
}

/// Validates that `bytes` is a valid compressed secp256r1 point encoding,
/// as required when decoding `OnValidatorsChanged`'s pubkey arguments.
pub fn validate_compressed_point(bytes: &[u8]) -> Result<(), CryptoError> {
    PublicKey::from_sec1_bytes(bytes)
        .map(|_| ())
        .map_err(|_| CryptoError::InvalidPoint { curve: "secp256r1" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signs_and_recovers_public_key() {
        let signer = NeoSigner::from_bytes(&[9u8; 32]).unwrap();
        let sig = signer.sign(b"payload", 0x334f454e).unwrap();
        assert_eq!(sig.len(), 64);
        let pubkey = signer.compressed_public_key().unwrap();
        validate_compressed_point(&pubkey).unwrap();
    }

    #[test]
    fn rejects_garbage_point() {
        assert!(validate_compressed_point(&[0u8; 33]).is_err());
    }
}
