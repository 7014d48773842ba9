//! DEX router entity; routers are the spenders a token approval targets

use crate::shared::constants::RouterConfigEntry;
use crate::shared::types::{Address, ChainId, RouterType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouterConfig {
    pub address: Address,
    pub chain_id: ChainId,
    pub router_type: RouterType,
}

impl RouterConfig {
    pub fn from_entry(entry: &RouterConfigEntry, chain_id: ChainId) -> Self {
        Self {
            address: entry.address.to_string(),
            chain_id,
            router_type: entry.router_type,
        }
    }

    pub fn name(&self) -> &'static str {
        self.router_type.name()
    }
}
