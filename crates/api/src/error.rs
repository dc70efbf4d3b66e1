// Path: crates/api/src/error.rs
//! The RPC error taxonomy consumed by the endpoint pool.

use thiserror::Error;

/// An error surfaced by a single chain RPC call.
///
/// The pool client's rotation policy hinges entirely on this distinction:
/// [`RpcError::Transport`] rotates to the next seed and retries;
/// [`RpcError::Application`] is surfaced to the caller verbatim.
#[derive(Debug, Error)]
pub enum RpcError {
    /// A transport, connection, or response-deserialisation failure. Not a
    /// structured application error, so it is retried against the next seed.
    #[error("transport error: {0}")]
    Transport(String),
    /// A structured RPC error returned by the node itself (an error code and
    /// message the node explicitly produced).
    #[error("application error {code}: {message}")]
    Application {
        /// The node-supplied error code.
        code: i64,
        /// The node-supplied error message.
        message: String,
    },
}

impl RpcError {
    /// Whether this error should trigger seed rotation.
    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport(_))
    }

    /// The message text, for idempotency-signal matching. Only
    /// application errors carry a message worth matching against.
    pub fn message(&self) -> Option<&str> {
        match self {
            RpcError::Application { message, .. } => Some(message),
            RpcError::Transport(_) => None,
        }
    }
}

impl From<serde_json::Error> for RpcError {
    fn from(e: serde_json::Error) -> Self {
        RpcError::Transport(format!("json decode: {e}"))
    }
}
