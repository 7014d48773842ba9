//! Allowance record - derived on every input change, never persisted

use crate::shared::types::{Address, DecimalString};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AllowanceRecord {
    pub owner: Option<Address>,
    pub spender: Option<Address>,
    pub token: Option<Address>,
    pub current_allowance: DecimalString,
    pub required_amount: DecimalString,
    pub needs_approval: bool,
}

impl AllowanceRecord {
    /// Nothing to approve: native asset, no wallet, or no token selected
    pub fn not_required(token: Option<Address>, required_amount: impl Into<DecimalString>) -> Self {
        Self {
            owner: None,
            spender: None,
            token,
            current_allowance: "0".to_string(),
            required_amount: required_amount.into(),
            needs_approval: false,
        }
    }

    /// Conservative default used when the allowance cannot be established
    pub fn must_approve(
        owner: Option<Address>,
        spender: Option<Address>,
        token: Option<Address>,
        required_amount: impl Into<DecimalString>,
    ) -> Self {
        Self {
            owner,
            spender,
            token,
            current_allowance: "0".to_string(),
            required_amount: required_amount.into(),
            needs_approval: true,
        }
    }
}
