//! Quote source
//!
//! Produces the raw counter amount for a swap. Pool routing lives behind
//! this trait; the core only decides how the result is displayed.

use crate::domain::entities::Token;
use crate::shared::error::WalletError;
use crate::shared::types::{ActiveInput, ChainId, DecimalString};
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuoteRepository: Send + Sync {
    /// For `ActiveInput::From` returns the expected output for `amount` of
    /// `from`; for `ActiveInput::To` the input required to receive `amount`
    /// of `to`.
    async fn quote(
        &self,
        chain_id: ChainId,
        from: &Token,
        to: &Token,
        amount: &str,
        side: ActiveInput,
    ) -> Result<DecimalString, WalletError>;
}
