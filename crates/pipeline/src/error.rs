// Path: crates/pipeline/src/error.rs
//! The pipeline's own error types and the top-level sum type
//! the outer loop terminates on.

use relay_api::RpcError;
use relay_decoder::DecodeError;
use relay_proof::ProofError;
use relay_txfactory::TxFactoryError;
use thiserror::Error;

/// Commit-round exhaustion: a broadcast transaction was never
/// observed as included within the retry budget.
#[derive(Debug, Error)]
#[error("transaction not observed as included after {rounds} commit rounds")]
pub struct CommitError {
    /// The number of rounds attempted before giving up.
    pub rounds: u32,
}

/// State-root scan exhaustion: no verified root was found within
/// the scan budget starting at `start`.
#[derive(Debug, Error)]
#[error("no verified state root found scanning heights [{start}, {end})")]
pub struct ScanError {
    /// The first height scanned.
    pub start: u32,
    /// One past the last height scanned.
    pub end: u32,
}

/// Every fatal cause `sync` or the outer loop can terminate on.
#[derive(Debug, Error)]
pub enum FatalErrorKind {
    /// An RPC call exhausted its transport retry budget or returned a
    /// structured application error.
    #[error(transparent)]
    Rpc(#[from] RpcError),
    /// A recognised source event failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
    /// A Merkle or state proof could not be built.
    #[error(transparent)]
    Proof(#[from] ProofError),
    /// The transaction factory could not build or sign a transaction.
    #[error(transparent)]
    TxFactory(#[from] TxFactoryError),
    /// A broadcast transaction was never observed as included.
    #[error(transparent)]
    Commit(#[from] CommitError),
    /// The verified-state-root scan exhausted its budget.
    #[error(transparent)]
    Scan(#[from] ScanError),
    /// An internal invariant was violated (e.g. a task's source tx id is
    /// missing from its own batch's transaction list).
    #[error("internal pipeline invariant violated: {0}")]
    Internal(String),
}

/// A fatal error, tagged with the source block index being processed when
/// it occurred.
#[derive(Debug, Error)]
#[error("fatal error at block {block_index}: {kind}")]
pub struct FatalError {
    /// The source block index being processed when the error occurred.
    pub block_index: u32,
    /// The underlying cause.
    #[source]
    pub kind: FatalErrorKind,
}

impl FatalError {
    /// Tags `kind` with the block index it occurred at.
    pub fn at(block_index: u32, kind: impl Into<FatalErrorKind>) -> Self {
        Self { block_index, kind: kind.into() }
    }

    /// A short, stable tag for the underlying cause, for metrics labelling.
    pub fn kind_tag(&self) -> &'static str {
        match &self.kind {
            FatalErrorKind::Rpc(_) => "rpc",
            FatalErrorKind::Decode(_) => "decode",
            FatalErrorKind::Proof(_) => "proof",
            FatalErrorKind::TxFactory(_) => "txfactory",
            FatalErrorKind::Commit(_) => "commit",
            FatalErrorKind::Scan(_) => "scan",
            FatalErrorKind::Internal(_) => "internal",
        }
    }
}
