// Path: crates/cli/src/lib.rs
#![forbid(unsafe_code)]
#![cfg_attr(
    not(test),
    deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::indexing_slicing)
)]

//! # Relay CLI
//!
//! The `minter` and `withdrawer` binaries' shared support: wallet file
//! loading and the hex address parsing config loading needs.

/// Wallet file loading.
pub mod wallet;

use std::fmt;

/// Parses a `0x`-prefixed or bare hex string into a 20-byte address.
pub fn parse_hex_address(raw: &str) -> Result<[u8; 20], HexAddressError> {
    let trimmed = raw.strip_prefix("0x").unwrap_or(raw);
    let bytes = hex::decode(trimmed)?;
    let len = bytes.len();
    bytes.try_into().map_err(|_| HexAddressError::WrongLength(len))
}

/// An error parsing a hex-encoded 20-byte address.
#[derive(Debug)]
pub enum HexAddressError {
    /// The string was not valid hex.
    Hex(hex::FromHexError),
    /// The decoded bytes were not exactly 20 long.
    WrongLength(usize),
}

impl fmt::Display for HexAddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HexAddressError::Hex(e) => write!(f, "invalid hex: {e}"),
            HexAddressError::WrongLength(n) => write!(f, "expected 20 bytes, got {n}"),
        }
    }
}

impl std::error::Error for HexAddressError {}

impl From<hex::FromHexError> for HexAddressError {
    fn from(e: hex::FromHexError) -> Self {
        HexAddressError::Hex(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_0x_prefix() {
        let expected = [0xabu8; 20];
        assert_eq!(parse_hex_address("0xabababababababababababababababababababab").unwrap(), expected);
        assert_eq!(parse_hex_address("abababababababababababababababababababab").unwrap(), expected);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(parse_hex_address("abcd"), Err(HexAddressError::WrongLength(2))));
    }
}
