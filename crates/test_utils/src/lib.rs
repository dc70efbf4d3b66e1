// Path: crates/test_utils/src/lib.rs
#![forbid(unsafe_code)]

//! # Relay Test Support
//!
//! Scripted mock RPC pools and fixture builders for testing the NEO/EVM
//! relayer without a real or simulated network connection. Dev-only: no
//! production crate depends on this one.
//!
//! Unlike the relayer's own crates, this one does not forbid
//! `unwrap`/`expect`/`panic!`: a test that exhausts its own script or
//! misuses a fixture should fail loudly at the call site, not be wrapped
//! in a `Result` nobody downstream would do anything with.

/// Assertion macros (`assert_ok!`, `assert_err!`, `assert_bytes_eq!`, `assert_in_range!`).
pub mod assertions;
/// Builders for the relayer's source-chain data model.
pub mod fixtures;
/// Scripted mock implementations of `MainChainRpc` and `SideChainRpc`.
pub mod mock;
/// Deterministic randomness for reproducible tests.
pub mod randomness;
