// Path: crates/crypto/src/lib.rs
//! # Relay Crypto Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::indexing_slicing
    )
)]
//! # Relay Cryptography
//!
//! Hashing (SHA-256, double-SHA-256, Keccak-256) and ECDSA signing
//! (secp256k1 for the EVM side chain, secp256r1 for the NEO main chain)
//! for the relayer's transaction factory and proof builder.

pub mod algorithms;
pub mod error;
pub mod signing;

#[cfg(test)]
mod tests {
    // Simple canary test to verify test discovery is working
    #[test]
    fn test_crypto_canary() {}
}
