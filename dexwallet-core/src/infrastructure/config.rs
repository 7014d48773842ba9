//! Core configuration
//!
//! Layered the same way everywhere: built-in defaults, then an optional
//! `dexwallet.toml`, then `DEXWALLET_*` environment variables (a `.env`
//! file is loaded first when present).
//!
//! Keys: `default_chain_id`, `default_slippage`, `storage_dir`, `log_level`,
//! `rpc_urls.<chain_id>` (env: `DEXWALLET_RPC_URLS__<chain_id>`).

use crate::shared::constants::{
    DEFAULT_CHAIN_ID, DEFAULT_SLIPPAGE_PERCENT, MAX_SLIPPAGE_PERCENT, MIN_SLIPPAGE_PERCENT,
    SUPPORTED_NETWORKS,
};
use crate::shared::error::WalletError;
use crate::shared::types::ChainId;
use config::{Config, Environment, File};
use dotenv::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const DEFAULT_CONFIG_FILE: &str = "dexwallet";
pub const ENV_PREFIX: &str = "DEXWALLET";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoreConfig {
    pub default_chain_id: ChainId,
    /// Slippage used until the user saves one, percent
    pub default_slippage: f64,
    /// Directory for persisted app state; OS data dir when unset
    #[serde(default)]
    pub storage_dir: Option<String>,
    pub log_level: String,
    /// RPC overrides keyed by chain id
    #[serde(default)]
    pub rpc_urls: HashMap<String, String>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_chain_id: DEFAULT_CHAIN_ID,
            default_slippage: DEFAULT_SLIPPAGE_PERCENT,
            storage_dir: None,
            log_level: if cfg!(debug_assertions) { "debug" } else { "info" }.to_string(),
            rpc_urls: HashMap::new(),
        }
    }
}

impl CoreConfig {
    /// Load from `./dexwallet.toml` (optional) and the environment
    pub fn load() -> Result<Self, WalletError> {
        Self::load_from(None)
    }

    pub fn load_from(path: Option<&str>) -> Result<Self, WalletError> {
        dotenv().ok(); // Load .env if present

        let defaults = Self::default();
        let file = match path {
            Some(path) => File::with_name(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: CoreConfig = Config::builder()
            .set_default("default_chain_id", defaults.default_chain_id as i64)?
            .set_default("default_slippage", defaults.default_slippage)?
            .set_default("log_level", defaults.log_level)?
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        log::debug!(
            "Loaded config: default chain {}, {} RPC override(s)",
            config.default_chain_id,
            config.rpc_urls.len()
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), WalletError> {
        if !self.default_slippage.is_finite()
            || self.default_slippage < MIN_SLIPPAGE_PERCENT
            || self.default_slippage > MAX_SLIPPAGE_PERCENT
        {
            return Err(WalletError::config(format!(
                "default_slippage must be within [{}, {}], got {}",
                MIN_SLIPPAGE_PERCENT, MAX_SLIPPAGE_PERCENT, self.default_slippage
            )));
        }
        for (chain_id, url) in &self.rpc_urls {
            if chain_id.parse::<ChainId>().is_err() {
                return Err(WalletError::config(format!("rpc_urls key is not a chain id: {}", chain_id)));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(WalletError::config(format!("RPC URL for chain {} must be http(s)", chain_id)));
            }
        }
        Ok(())
    }

    /// Configured override, else the built-in network default
    pub fn rpc_url(&self, chain_id: ChainId) -> Option<String> {
        if let Some(url) = self.rpc_urls.get(&chain_id.to_string()) {
            return Some(url.clone());
        }
        SUPPORTED_NETWORKS
            .iter()
            .find(|n| n.chain_id == chain_id)
            .map(|n| n.rpc_url.to_string())
            .filter(|url| !url.is_empty())
    }

    /// Every chain with a usable RPC endpoint
    pub fn resolved_rpc_urls(&self) -> HashMap<ChainId, String> {
        let mut urls: HashMap<ChainId, String> = SUPPORTED_NETWORKS
            .iter()
            .filter(|n| !n.rpc_url.is_empty())
            .map(|n| (n.chain_id, n.rpc_url.to_string()))
            .collect();
        for (chain_id, url) in &self.rpc_urls {
            if let Ok(chain_id) = chain_id.parse::<ChainId>() {
                urls.insert(chain_id, url.clone());
            }
        }
        urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = CoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_chain_id, DEFAULT_CHAIN_ID);
        assert_eq!(config.rpc_url(56), Some("https://bsc-dataseed.binance.org".to_string()));
        assert_eq!(config.rpc_url(999_999), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("dexwallet.toml");
        let mut file = std::fs::File::create(&path).expect("Failed to create config file");
        writeln!(
            file,
            "default_chain_id = 56\ndefault_slippage = 1.5\nlog_level = \"warn\"\n\n[rpc_urls]\n\"56\" = \"https://bsc.example.org\""
        )
        .expect("Failed to write config file");

        let config = CoreConfig::load_from(path.to_str()).expect("Failed to load config");
        assert_eq!(config.default_chain_id, 56);
        assert_eq!(config.default_slippage, 1.5);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.rpc_url(56), Some("https://bsc.example.org".to_string()));
        assert_eq!(config.resolved_rpc_urls().get(&56), Some(&"https://bsc.example.org".to_string()));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = CoreConfig {
            default_slippage: 150.0,
            ..CoreConfig::default()
        };
        assert!(matches!(config.validate(), Err(WalletError::Config(_))));

        let mut config = CoreConfig::default();
        config.rpc_urls.insert("mainnet".to_string(), "https://x.org".to_string());
        assert!(config.validate().is_err());

        let mut config = CoreConfig::default();
        config.rpc_urls.insert("1".to_string(), "ftp://x.org".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        assert!(CoreConfig::load_from(Some("/nonexistent/dexwallet.toml")).is_err());
    }
}
