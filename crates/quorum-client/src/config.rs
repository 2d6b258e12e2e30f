//! Configuration management for the quorum client

use quorum_types::ChainProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("io error:: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("toml parsing error:: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("toml serialization error:: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// No profile configured for the requested chain
    #[error("unknown chain:: {0}")]
    UnknownChain(String),
}

/// Client configuration: the record store endpoint and the chain profiles
/// the application serves
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Signature record store base URL
    pub record_store: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Supported chains; families are declared here, once
    pub chains: Vec<ChainProfile>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            record_store: "http://localhost:3000/api".to_string(),
            timeout: 30,
            chains: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The profile for a chain id
    pub fn profile(&self, chain_id: &str) -> Result<&ChainProfile, ConfigError> {
        self.chains
            .iter()
            .find(|chain| chain.chain_id == chain_id)
            .ok_or_else(|| ConfigError::UnknownChain(chain_id.to_string()))
    }

    /// The profile whose bech32 prefix matches an address prefix
    pub fn profile_for_prefix(&self, prefix: &str) -> Result<&ChainProfile, ConfigError> {
        self.chains
            .iter()
            .find(|chain| chain.prefix == prefix)
            .ok_or_else(|| ConfigError::UnknownChain(prefix.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_types::ChainFamily;

    fn sample_config() -> ClientConfig {
        ClientConfig {
            record_store: "https://records.example.com/api".to_string(),
            timeout: 30,
            chains: vec![
                ChainProfile {
                    chain_id: "cosmoshub-4".to_string(),
                    prefix: "cosmos".to_string(),
                    rpc: "https://rpc.cosmos.example".to_string(),
                    api: "https://lcd.cosmos.example".to_string(),
                    denom: "uatom".to_string(),
                    display_denom: "ATOM".to_string(),
                    explorer_tx_url: "https://explorer.example/cosmos/tx/".to_string(),
                    family: ChainFamily::Standard,
                },
                ChainProfile {
                    chain_id: "injective-1".to_string(),
                    prefix: "inj".to_string(),
                    rpc: "https://rpc.injective.example".to_string(),
                    api: "https://lcd.injective.example".to_string(),
                    denom: "inj".to_string(),
                    display_denom: "INJ".to_string(),
                    explorer_tx_url: "https://explorer.example/injective/tx/".to_string(),
                    family: ChainFamily::Injective,
                },
            ],
        }
    }

    #[test]
    fn test_profile_lookup() {
        let config = sample_config();
        assert_eq!(config.profile("cosmoshub-4").unwrap().prefix, "cosmos");
        assert_eq!(
            config.profile_for_prefix("inj").unwrap().family,
            ChainFamily::Injective
        );
        assert!(config.profile("osmosis-1").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = sample_config();
        let encoded = toml::to_string_pretty(&config).unwrap();
        let decoded: ClientConfig = toml::from_str(&encoded).unwrap();
        assert_eq!(decoded.chains.len(), 2);
        assert_eq!(decoded.chains[1].family, ChainFamily::Injective);
        assert_eq!(decoded.record_store, config.record_store);
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = sample_config();
        config.save_to_file(&path).unwrap();
        let loaded = ClientConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.chains.len(), 2);
    }
}
