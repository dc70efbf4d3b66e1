// Path: crates/pipeline/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)
)]

//! # Relay Pipeline
//!
//! The relay state machine: a generic `sync` engine parametrised
//! over a [`source::SourceChain`] and a [`destination::DestinationChain`],
//! and the two concrete wirings — [`minter`] (main → side) and
//! [`withdrawer`] (side → main) — that give the engine its per-chain
//! behaviour. One algorithm, swapped implementations, grounded on the same
//! `LightClient`-style trait split used elsewhere in this codebase.

/// The commit-and-poll protocol shared by both destination wirings.
pub mod commit;
/// The destination-side capability `sync` drives.
pub mod destination;
/// The pipeline's own error types and the top-level fatal error.
pub mod error;
/// `sync(batch)`: the dependency-ordered commit algorithm.
pub mod engine;
/// The minter wiring (main → side).
pub mod minter;
/// The outer loop: block ingestion and the caught-up flag.
pub mod outer;
/// `get_verified_state_root`'s scan, shared by both source wirings.
pub mod root_scan;
/// The source-side capability `sync` drives.
pub mod source;
/// The withdrawer wiring (side → main).
pub mod withdrawer;

pub use destination::DestinationChain;
pub use engine::sync;
pub use error::{CommitError, FatalError, FatalErrorKind, ScanError};
pub use minter::{MinterDestination, MinterSource};
pub use outer::Pipeline;
pub use source::SourceChain;
pub use withdrawer::{WithdrawerDestination, WithdrawerSource};
