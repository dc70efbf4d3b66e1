// Path: crates/decoder/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)
)]

//! # Relay Decoder
//!
//! The event decoder: turns main-chain application logs and
//! side-chain transaction receipts into the typed [`relay_types::Task`]
//! values the rest of the relayer operates on. Decoding is total over
//! well-shaped events (amount gating silently drops a task) and fails
//! fatally over malformed ones (`DecodeError`), since a malformed event from
//! a trusted bridge contract means the relayer's assumptions about that
//! contract's ABI no longer hold.

/// The shared decode error type.
pub mod error;
/// Decodes main-chain application-log notifications.
pub mod main_chain;
/// Decodes side-chain transaction receipts.
pub mod side_chain;

pub use error::DecodeError;
pub use main_chain::MainChainDecoder;
pub use side_chain::SideChainDecoder;
