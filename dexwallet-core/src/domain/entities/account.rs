//! Connected-account snapshot pushed by the wallet connection provider

use crate::shared::types::{Address, ChainId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountState {
    pub address: Option<Address>,
    pub chain_id: Option<ChainId>,
    pub is_connected: bool,
}

impl AccountState {
    pub fn connected(address: impl Into<Address>, chain_id: ChainId) -> Self {
        Self {
            address: Some(address.into()),
            chain_id: Some(chain_id),
            is_connected: true,
        }
    }

    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Owner address, only while a wallet is actually connected
    pub fn owner(&self) -> Option<&str> {
        if !self.is_connected {
            return None;
        }
        self.address.as_deref().filter(|a| !a.is_empty())
    }
}
