//! DEX router registry
//!
//! Routers per chain in priority order. The first entry is the spender an
//! approval targets.

use crate::domain::entities::RouterConfig;
use crate::shared::constants::{
    BSC_CHAIN_ID, BSC_ROUTERS, ETHEREUM_CHAIN_ID, ETHEREUM_ROUTERS, POLYGON_CHAIN_ID,
    POLYGON_ROUTERS,
};
use crate::shared::types::ChainId;
use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    static ref ROUTERS: HashMap<ChainId, Vec<RouterConfig>> = {
        let mut m = HashMap::new();
        for (chain_id, table) in [
            (ETHEREUM_CHAIN_ID, ETHEREUM_ROUTERS),
            (BSC_CHAIN_ID, BSC_ROUTERS),
            (POLYGON_CHAIN_ID, POLYGON_ROUTERS),
        ] {
            m.insert(chain_id, table.iter().map(|e| RouterConfig::from_entry(e, chain_id)).collect());
        }
        m
    };
}

#[derive(Debug, Clone)]
pub struct RouterRegistry {
    routers: HashMap<ChainId, Vec<RouterConfig>>,
}

impl Default for RouterRegistry {
    fn default() -> Self {
        Self {
            routers: ROUTERS.clone(),
        }
    }
}

impl RouterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry over an explicit table, replacing the built-in one
    pub fn with_routers(routers: HashMap<ChainId, Vec<RouterConfig>>) -> Self {
        Self { routers }
    }

    pub fn routers(&self, chain_id: ChainId) -> &[RouterConfig] {
        self.routers.get(&chain_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn default_router(&self, chain_id: ChainId) -> Option<&RouterConfig> {
        self.routers(chain_id).first()
    }

    /// Chains with at least one router, ascending
    pub fn chains(&self) -> Vec<ChainId> {
        let mut chains: Vec<ChainId> = self
            .routers
            .iter()
            .filter(|(_, r)| !r.is_empty())
            .map(|(id, _)| *id)
            .collect();
        chains.sort_unstable();
        chains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::constants::SEPOLIA_CHAIN_ID;
    use crate::shared::types::RouterType;

    #[test]
    fn test_default_router_is_first_entry() {
        let registry = RouterRegistry::new();
        let router = registry.default_router(ETHEREUM_CHAIN_ID).expect("No router for mainnet");
        assert_eq!(router.router_type, RouterType::UniswapV2);
        assert_eq!(router.name(), RouterType::UniswapV2.name());
        assert_eq!(registry.routers(ETHEREUM_CHAIN_ID).len(), 2);
    }

    #[test]
    fn test_chain_without_router() {
        let registry = RouterRegistry::new();
        assert!(registry.default_router(SEPOLIA_CHAIN_ID).is_none());
        assert!(registry.routers(999).is_empty());
        assert_eq!(registry.chains(), vec![ETHEREUM_CHAIN_ID, BSC_CHAIN_ID, POLYGON_CHAIN_ID]);
    }

    #[test]
    fn test_custom_table() {
        let registry = RouterRegistry::with_routers(HashMap::from([(5, vec![])]));
        assert!(registry.default_router(5).is_none());
        assert!(registry.chains().is_empty());
    }
}
