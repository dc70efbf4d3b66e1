// Path: crates/crypto/src/error.rs
//! Error types for the `relay-crypto` crate.

use thiserror::Error;

/// Errors raised by hashing or signing operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A digest had an unexpected length.
    #[error("invalid hash length: expected {expected}, got {got}")]
    InvalidHashLength {
        /// The expected digest length, in bytes.
        expected: usize,
        /// The digest length actually produced.
        got: usize,
    },
    /// The underlying hash implementation failed.
    #[error("hash computation failed: {0}")]
    HashFailed(String),
    /// A secret key or signature was malformed.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
    /// A compressed public-key encoding did not decode to a valid curve point.
    #[error("invalid point encoding for {curve}")]
    InvalidPoint {
        /// The curve name, for diagnostics (`"secp256k1"` or `"secp256r1"`).
        curve: &'static str,
    },
    /// Signing itself failed.
    #[error("signing failed: {0}")]
    SigningFailed(String),
}

impl From<dcrypt::Error> for CryptoError {
    fn from(e: dcrypt::Error) -> Self {
        CryptoError::HashFailed(e.to_string())
    }
}
