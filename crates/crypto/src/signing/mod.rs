// Path: crates/crypto/src/signing/mod.rs
//! ECDSA signing for both destination chain shapes.

/// secp256k1 signing for EIP-155 legacy transactions.
pub mod evm;
/// secp256r1 signing for NEO invocation witnesses.
pub mod neo;
