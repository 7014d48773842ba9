//! Allowance resolver
//!
//! Decides whether an ERC-20 approval must be sent before a swap. Every
//! failure on the way to a real allowance figure resolves to "approval
//! needed": a redundant approval costs gas, a missing one fails the swap.

use crate::core::math::PreciseAmount;
use crate::core::routers::RouterRegistry;
use crate::domain::entities::{AccountState, AllowanceRecord, Token};
use crate::domain::repositories::ContractRepository;
use crate::shared::types::{ChainId, DecimalString};
use std::sync::Arc;

/// Inputs the allowance depends on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllowanceQuery {
    pub token: Option<Token>,
    pub chain_id: Option<ChainId>,
    /// Amount the swap may spend, display units
    pub amount: DecimalString,
    pub account: AccountState,
}

pub struct AllowanceResolver {
    gateway: Arc<dyn ContractRepository>,
    routers: RouterRegistry,
}

impl AllowanceResolver {
    pub fn new(gateway: Arc<dyn ContractRepository>, routers: RouterRegistry) -> Self {
        Self { gateway, routers }
    }

    pub fn routers(&self) -> &RouterRegistry {
        &self.routers
    }

    pub async fn resolve(&self, query: &AllowanceQuery) -> AllowanceRecord {
        let token_address = query.token.as_ref().map(|t| t.address.clone());
        let required = query.amount.clone();

        let (token, owner, chain_id) = match (&query.token, query.account.owner(), query.chain_id) {
            (Some(token), Some(owner), Some(chain_id)) if !token.is_native_asset() => (token, owner, chain_id),
            _ => return AllowanceRecord::not_required(token_address, required),
        };

        let Some(router) = self.routers.default_router(chain_id) else {
            log::warn!("No router configured for chain {}, assuming approval is needed", chain_id);
            return AllowanceRecord::must_approve(Some(owner.to_string()), None, token_address, required);
        };
        let spender = router.address.clone();

        let current = match self
            .gateway
            .read_allowance(token, owner, &spender, chain_id)
            .await
        {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Allowance read for {} failed: {}", token.symbol, e);
                return AllowanceRecord::must_approve(Some(owner.to_string()), Some(spender), token_address, required);
            }
        };
        let Some(current_amount) = PreciseAmount::parse(&current) else {
            log::warn!("Unparsable allowance {:?} for {}", current, token.symbol);
            return AllowanceRecord::must_approve(Some(owner.to_string()), Some(spender), token_address, required);
        };

        let required_amount = PreciseAmount::parse(&required).unwrap_or_else(PreciseAmount::zero);
        let needs_approval = current_amount < required_amount;
        log::debug!(
            "Allowance {} {} for {} (required {}): approval {}",
            current,
            token.symbol,
            router.name(),
            required,
            if needs_approval { "needed" } else { "not needed" }
        );

        AllowanceRecord {
            owner: Some(owner.to_string()),
            spender: Some(spender),
            token: token_address,
            current_allowance: current,
            required_amount: required,
            needs_approval,
        }
    }
}
