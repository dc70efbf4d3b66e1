// Path: crates/txfactory/src/error.rs
//! Transaction-factory errors.

use relay_api::RpcError;
use relay_crypto::error::CryptoError;
use thiserror::Error;

/// Errors raised while building a destination-chain transaction.
#[derive(Debug, Error)]
pub enum TxFactoryError {
    /// The underlying RPC call failed (and was not an idempotency signal).
    #[error(transparent)]
    Rpc(#[from] RpcError),
    /// Signing or key handling failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    /// A NEO `invoke_script` simulation faulted with a non-idempotent reason.
    #[error("invocation faulted: {0}")]
    Fault(String),
    /// A canonical encoding or decoding step failed.
    #[error("encoding error: {0}")]
    Encoding(String),
}
