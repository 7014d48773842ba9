//! Contract read gateway
//!
//! Read-only access to on-chain token state. Implementations return amounts
//! already converted to display units using the token's decimals.

use crate::domain::entities::Token;
use crate::shared::error::WalletError;
use crate::shared::types::{ChainId, DecimalString};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractRepository: Send + Sync {
    /// ERC-20 `allowance(owner, spender)` as a decimal string
    async fn read_allowance(
        &self,
        token: &Token,
        owner: &str,
        spender: &str,
        chain_id: ChainId,
    ) -> Result<DecimalString, WalletError>;
}
