// Path: crates/crypto/src/algorithms/mod.rs
//! Hashing algorithms used by the relayer.

/// SHA-256, SHA-512, double-SHA-256, and Keccak-256 hash helpers.
pub mod hash;
