//! Token entity for the swap core

use crate::shared::constants::{TokenConfig, MAX_TOKEN_DECIMALS, MAX_TOKEN_SYMBOL_LENGTH};
use crate::shared::error::WalletError;
use crate::shared::types::{Address, ChainId};
use crate::shared::utils::{current_timestamp, is_native_address, normalize_address, validate_ethereum_address};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A token as shown in the picker. Equality compares the token's identity
/// and display fields; `added_at` is bookkeeping and does not take part.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub chain_id: ChainId,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub is_native: bool,
    /// Set by the registry for user-added entries, never taken from input
    #[serde(default)]
    pub is_custom: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
            && self.chain_id == other.chain_id
            && self.symbol == other.symbol
            && self.name == other.name
            && self.decimals == other.decimals
            && self.is_native == other.is_native
            && self.is_custom == other.is_custom
    }
}

impl Eq for Token {}

impl Token {
    pub fn new(
        address: impl Into<Address>,
        chain_id: ChainId,
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
    ) -> Self {
        Self {
            address: address.into(),
            chain_id,
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            is_native: false,
            is_custom: false,
            added_at: None,
        }
    }

    pub fn from_config(config: &TokenConfig, chain_id: ChainId) -> Self {
        Self {
            is_native: config.is_native,
            ..Self::new(config.address, chain_id, config.symbol, config.name, config.decimals)
        }
    }

    /// Case-folded address used as the registry key
    pub fn key(&self) -> String {
        normalize_address(&self.address)
    }

    pub fn has_address(&self, address: &str) -> bool {
        self.key() == normalize_address(address)
    }

    /// Native coin of the chain, by flag or by the zero address
    pub fn is_native_asset(&self) -> bool {
        self.is_native || is_native_address(&self.address)
    }

    /// Validate a user-supplied token before it is persisted
    pub fn validate(&self) -> Result<(), WalletError> {
        validate_ethereum_address(self.address.trim())?;

        let symbol = self.symbol.trim();
        if symbol.is_empty() {
            return Err(WalletError::validation("Token symbol cannot be empty"));
        }
        if symbol.len() > MAX_TOKEN_SYMBOL_LENGTH {
            return Err(WalletError::validation(format!(
                "Token symbol must be at most {} characters",
                MAX_TOKEN_SYMBOL_LENGTH
            )));
        }
        if self.decimals > MAX_TOKEN_DECIMALS {
            return Err(WalletError::validation(format!(
                "Token decimals must be at most {}",
                MAX_TOKEN_DECIMALS
            )));
        }
        Ok(())
    }

    /// Re-tag as a custom entry of `chain_id`, whatever chain the input carried
    pub fn into_custom(self, chain_id: ChainId) -> Self {
        Self {
            chain_id,
            is_custom: true,
            is_native: false,
            added_at: self.added_at.or_else(|| Some(current_timestamp())),
            ..self
        }
    }
}
