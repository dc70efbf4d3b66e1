// Path: crates/types/src/config.rs
//! `RelayerConfig`: the JSON configuration file loaded at startup.
//!
//! Configuration file loading is an external collaborator, not part of the
//! relay core, but the struct itself is the boundary the core is threaded
//! through and so is part of the data model.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// The JSON relayer configuration file loaded at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayerConfig {
    /// Main-chain (NEO-style) RPC seed URLs.
    #[serde(rename = "mainSeeds")]
    pub main_seeds: Vec<String>,
    /// Side-chain (EVM) RPC seed URLs.
    #[serde(rename = "sideSeeds")]
    pub side_seeds: Vec<String>,
    /// Floor for `get_verified_state_root`'s scan.
    #[serde(rename = "verifiedRootStart")]
    pub verified_root_start: u32,
    /// First source block index to process.
    pub start: u32,
    /// One-past-the-last source block index to process; 0 = unbounded.
    pub end: u32,
    /// The 20-byte bridge contract address.
    #[serde(rename = "bridgeContract", with = "hex_address")]
    pub bridge_contract: [u8; 20],
    /// Path to the relayer's wallet file (decoded by an external collaborator).
    pub wallet: String,
    /// The relayer's own address/script hash.
    pub relayer: String,
}

/// Errors loading or validating a [`RelayerConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read from disk.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The config file was not valid JSON, or had the wrong shape.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        /// The path that failed to parse.
        path: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
    /// A loaded config failed validation.
    #[error("invalid relayer config: {0}")]
    Invalid(&'static str),
}

impl RelayerConfig {
    /// Loads and validates a [`RelayerConfig`] from a JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let cfg: RelayerConfig = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Validates non-empty seed lists and a non-zero bridge contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.main_seeds.is_empty() {
            return Err(ConfigError::Invalid("mainSeeds must not be empty"));
        }
        if self.side_seeds.is_empty() {
            return Err(ConfigError::Invalid("sideSeeds must not be empty"));
        }
        if self.bridge_contract == [0u8; 20] {
            return Err(ConfigError::Invalid("bridgeContract must not be the zero address"));
        }
        Ok(())
    }
}

mod hex_address {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(addr: &[u8; 20], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&format!("0x{}", hex::encode(addr)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 20], D::Error> {
        let raw = String::deserialize(d)?;
        let trimmed = raw.strip_prefix("0x").unwrap_or(&raw);
        let bytes = hex::decode(trimmed).map_err(D::Error::custom)?;
        bytes.try_into().map_err(|b: Vec<u8>| D::Error::custom(format!("expected 20 bytes, got {}", b.len())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RelayerConfig {
        RelayerConfig {
            main_seeds: vec!["http://seed-a".into()],
            side_seeds: vec!["http://seed-b".into()],
            verified_root_start: 0,
            start: 0,
            end: 0,
            bridge_contract: [1u8; 20],
            wallet: "wallet.json".into(),
            relayer: "relayer-addr".into(),
        }
    }

    #[test]
    fn rejects_empty_main_seeds() {
        let mut cfg = sample();
        cfg.main_seeds.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_bridge_contract() {
        let mut cfg = sample();
        cfg.bridge_contract = [0u8; 20];
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn accepts_valid_config() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = sample();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: RelayerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.bridge_contract, back.bridge_contract);
    }
}
