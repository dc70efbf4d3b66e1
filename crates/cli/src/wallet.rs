// Path: crates/cli/src/wallet.rs
//! Wallet file loading.
//!
//! The original NEO tooling decrypts a NEP-6 wallet (scrypt-derived key,
//! AES-encrypted private key, interactively prompted passphrase) to recover
//! the relayer's signing key. None of the crates this workspace already
//! depends on cover that decryption, so this loads a plaintext JSON wallet
//! file instead: `{"relayer": "0x...", "privateKey": "0x..."}`, with the
//! `relayer` field checked against the value configured in `RelayerConfig`
//! so a wallet file pointed at the wrong key fails fast rather than signing
//! with an unexpected address.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Deserialize)]
struct WalletFile {
    relayer: String,
    #[serde(rename = "privateKey")]
    private_key: String,
}

/// An error loading a wallet file.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The wallet file could not be read from disk.
    #[error("failed to read wallet file {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The wallet file was not valid JSON, or had the wrong shape.
    #[error("failed to parse wallet file {path}: {source}")]
    Parse {
        /// The path that failed to parse.
        path: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// The wallet's `relayer` field did not match the configured address.
    #[error("wallet relayer {found} does not match configured relayer {expected}")]
    RelayerMismatch {
        /// The address found in the wallet file.
        found: String,
        /// The address configured in the relayer config.
        expected: String,
    },
    /// The `privateKey` field was not a valid 32-byte hex string.
    #[error("invalid private key in wallet file: {0}")]
    InvalidKey(#[from] crate::HexAddressError),
}

fn normalize(addr: &str) -> String {
    addr.strip_prefix("0x").unwrap_or(addr).to_ascii_lowercase()
}

/// Loads the 32-byte private key from the wallet file at `path`, checking
/// that its `relayer` field matches `expected_relayer`.
pub fn load_private_key(path: &Path, expected_relayer: &str) -> Result<[u8; 32], WalletError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|source| WalletError::Io { path: path.display().to_string(), source })?;
    let wallet: WalletFile = serde_json::from_str(&raw)
        .map_err(|source| WalletError::Parse { path: path.display().to_string(), source })?;

    if normalize(&wallet.relayer) != normalize(expected_relayer) {
        return Err(WalletError::RelayerMismatch { found: wallet.relayer, expected: expected_relayer.to_string() });
    }

    let trimmed = wallet.private_key.strip_prefix("0x").unwrap_or(&wallet.private_key);
    let bytes = hex::decode(trimmed).map_err(|e| WalletError::InvalidKey(e.into()))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| WalletError::InvalidKey(crate::HexAddressError::WrongLength(len)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_wallet(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_a_matching_wallet() {
        let file = write_wallet(&format!(r#"{{"relayer":"0xabc123","privateKey":"0x{}"}}"#, "01".repeat(32)));
        let key = load_private_key(file.path(), "0xABC123").expect("loads");
        assert_eq!(key, [1u8; 32]);
    }

    #[test]
    fn rejects_a_relayer_mismatch() {
        let file = write_wallet(&format!(r#"{{"relayer":"0xabc123","privateKey":"0x{}"}}"#, "02".repeat(32)));
        let err = load_private_key(file.path(), "0xdeadbeef").unwrap_err();
        assert!(matches!(err, WalletError::RelayerMismatch { .. }));
    }

    #[test]
    fn rejects_a_short_key() {
        let file = write_wallet(r#"{"relayer":"0xabc123","privateKey":"0x01"}"#);
        let err = load_private_key(file.path(), "0xabc123").unwrap_err();
        assert!(matches!(err, WalletError::InvalidKey(_)));
    }

    #[test]
    fn reports_missing_file() {
        let err = load_private_key(Path::new("/nonexistent/wallet.json"), "0xabc123").unwrap_err();
        assert!(matches!(err, WalletError::Io { .. }));
    }
}
