//! Settings repository for the persisted application state
//!
//! Custom tokens are keyed by chain id. Slippage writes are validated here,
//! at the write boundary, so readers never see an out-of-range value.

use crate::domain::entities::Token;
use crate::shared::error::WalletError;
use crate::shared::types::ChainId;
use async_trait::async_trait;

/// Persistent config store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load persisted state into the store; called once by the app context
    async fn load(&self) -> Result<(), WalletError>;

    /// Custom tokens stored for a chain, in insertion order
    async fn get_custom_tokens(&self, chain_id: ChainId) -> Result<Vec<Token>, WalletError>;

    /// Append a custom token; no-op if the case-folded address is already stored
    async fn add_custom_token(&self, chain_id: ChainId, token: Token) -> Result<(), WalletError>;

    /// Remove by case-folded address; absent is not an error
    async fn remove_custom_token(&self, chain_id: ChainId, address: &str) -> Result<(), WalletError>;

    async fn get_slippage(&self) -> Result<f64, WalletError>;

    /// Returns `false` without persisting when `value` is outside [0, 100]
    async fn set_slippage(&self, value: f64) -> Result<bool, WalletError>;

    async fn get_expert_mode(&self) -> Result<bool, WalletError>;

    async fn set_expert_mode(&self, enabled: bool) -> Result<(), WalletError>;
}
