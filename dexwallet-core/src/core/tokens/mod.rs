//! Token registry
//!
//! Static base tokens per chain merged with the user's custom tokens. The
//! merged list is keyed by case-folded address and a base entry always wins
//! over a custom entry with the same address.

use crate::core::context::AppContext;
use crate::domain::entities::Token;
use crate::domain::repositories::SettingsRepository;
use crate::shared::constants::{
    BSC_CHAIN_ID, BSC_TOKENS, ETHEREUM_CHAIN_ID, ETHEREUM_TOKENS, POLYGON_CHAIN_ID,
    POLYGON_TOKENS, SEPOLIA_CHAIN_ID, SEPOLIA_TOKENS,
};
use crate::shared::error::WalletError;
use crate::shared::types::ChainId;
use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

lazy_static! {
    static ref BASE_TOKENS: HashMap<ChainId, Vec<Token>> = {
        let mut m = HashMap::new();
        for (chain_id, table) in [
            (ETHEREUM_CHAIN_ID, ETHEREUM_TOKENS),
            (BSC_CHAIN_ID, BSC_TOKENS),
            (POLYGON_CHAIN_ID, POLYGON_TOKENS),
            (SEPOLIA_CHAIN_ID, SEPOLIA_TOKENS),
        ] {
            m.insert(chain_id, table.iter().map(|c| Token::from_config(c, chain_id)).collect());
        }
        m
    };
}

/// Immutable base list for a chain; empty for unknown chains
pub fn base_tokens(chain_id: ChainId) -> &'static [Token] {
    BASE_TOKENS.get(&chain_id).map(Vec::as_slice).unwrap_or(&[])
}

/// Base entries in table order, then custom entries whose address is new
pub fn merge_tokens(base: &[Token], custom: Vec<Token>) -> Vec<Token> {
    let mut seen: HashSet<String> = base.iter().map(Token::key).collect();
    let mut merged = base.to_vec();
    for token in custom {
        if seen.insert(token.key()) {
            merged.push(Token {
                is_custom: true,
                ..token
            });
        }
    }
    merged
}

pub struct TokenRegistry {
    context: Arc<AppContext>,
}

impl TokenRegistry {
    pub fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }

    /// Tokens to present for `chain_id`. Never fails: problems are logged
    /// and produce an empty list.
    pub async fn load_tokens(&self, chain_id: ChainId) -> Vec<Token> {
        let base = base_tokens(chain_id);
        if base.is_empty() {
            log::warn!("No base token list for chain {}", chain_id);
        }

        let Some(settings) = self.context.settings() else {
            log::warn!("Token list requested before the app context was initialized, serving base list");
            return base.to_vec();
        };

        match settings.get_custom_tokens(chain_id).await {
            Ok(custom) => {
                let merged = merge_tokens(base, custom);
                log::debug!("Loaded {} token(s) for chain {}", merged.len(), chain_id);
                merged
            }
            Err(e) => {
                log::error!("Failed to load custom tokens for chain {}: {}", chain_id, e);
                Vec::new()
            }
        }
    }

    pub async fn add_custom_token(&self, chain_id: ChainId, token: Token) -> Result<(), WalletError> {
        token.validate()?;
        let settings = self.require_settings()?;
        let token = Token {
            address: token.address.trim().to_string(),
            symbol: token.symbol.trim().to_string(),
            ..token
        };
        settings.add_custom_token(chain_id, token.into_custom(chain_id)).await
    }

    pub async fn remove_custom_token(&self, chain_id: ChainId, address: &str) -> Result<(), WalletError> {
        self.require_settings()?
            .remove_custom_token(chain_id, address)
            .await
    }

    /// Case-insensitive lookup over the merged list
    pub async fn find_token(&self, chain_id: ChainId, address: &str) -> Option<Token> {
        self.load_tokens(chain_id)
            .await
            .into_iter()
            .find(|t| t.has_address(address))
    }

    fn require_settings(&self) -> Result<Arc<dyn SettingsRepository>, WalletError> {
        self.context
            .settings()
            .ok_or_else(|| WalletError::internal("App context is not initialized"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::AppStateStore;
    use crate::domain::repositories::{MockSettingsRepository, SettingsRepository};
    use crate::infrastructure::platform::MemoryStorage;

    const UNI: &str = "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    async fn ready_registry() -> (TokenRegistry, Arc<AppStateStore<MemoryStorage>>) {
        let store = Arc::new(AppStateStore::new(MemoryStorage::new()));
        let context = Arc::new(AppContext::new(store.clone()));
        context.init().await.expect("Failed to initialize context");
        (TokenRegistry::new(context), store)
    }

    #[test]
    fn test_base_tables() {
        assert_eq!(base_tokens(1)[0].symbol, "ETH");
        assert!(base_tokens(1)[0].is_native);
        assert!(base_tokens(1).iter().all(|t| !t.is_custom && t.chain_id == 1));
        assert!(base_tokens(424242).is_empty());
    }

    #[test]
    fn test_merge_base_wins() {
        let base = vec![Token::new("0xAAA", 1, "A", "A", 18), Token::new("0xBBB", 1, "B", "B", 18)];
        let custom = vec![Token::new("0xbbb", 1, "B2", "B2", 18), Token::new("0xCCC", 1, "C", "C", 18)];

        let merged = merge_tokens(&base, custom);
        let symbols: Vec<&str> = merged.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["A", "B", "C"]);
        assert!(!merged[1].is_custom);
        assert!(merged[2].is_custom);
    }

    #[tokio::test]
    async fn test_load_tokens_appends_custom() {
        let (registry, _store) = ready_registry().await;
        registry
            .add_custom_token(1, Token::new(UNI, 1, "UNI", "Uniswap", 18))
            .await
            .expect("Failed to add token");

        let tokens = registry.load_tokens(1).await;
        assert_eq!(tokens.len(), base_tokens(1).len() + 1);
        let last = tokens.last().expect("Token list is empty");
        assert_eq!(last.symbol, "UNI");
        assert!(last.is_custom);

        // Custom tokens do not leak into other chains
        assert_eq!(registry.load_tokens(56).await.len(), base_tokens(56).len());
    }

    #[tokio::test]
    async fn test_custom_duplicate_of_base_is_hidden() {
        let (registry, store) = ready_registry().await;
        registry
            .add_custom_token(1, Token::new(USDC.to_lowercase(), 1, "FAKE", "Fake USDC", 6))
            .await
            .expect("Failed to add token");

        // Stored, but the base entry wins in the merged view
        assert_eq!(store.get_custom_tokens(1).await.expect("Failed to read tokens").len(), 1);
        let usdc = registry.find_token(1, USDC).await.expect("USDC missing");
        assert_eq!(usdc.symbol, "USDC");
        assert!(!usdc.is_custom);
        assert_eq!(registry.load_tokens(1).await.len(), base_tokens(1).len());
    }

    #[tokio::test]
    async fn test_add_forces_chain_and_validates() {
        let (registry, store) = ready_registry().await;
        registry
            .add_custom_token(137, Token::new(UNI, 1, "UNI", "Uniswap", 18))
            .await
            .expect("Failed to add token");
        assert_eq!(store.get_custom_tokens(137).await.expect("Failed to read tokens")[0].chain_id, 137);

        let result = registry
            .add_custom_token(1, Token::new("0x1234", 1, "BAD", "Bad", 18))
            .await;
        assert!(matches!(result, Err(WalletError::Validation(_))));
        assert!(store.get_custom_tokens(1).await.expect("Failed to read tokens").is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_re_add() {
        let (registry, _store) = ready_registry().await;
        let uni = Token::new(UNI, 1, "UNI", "Uniswap", 18);
        registry.add_custom_token(1, uni.clone()).await.expect("Failed to add token");
        let before = registry.load_tokens(1).await;

        registry.remove_custom_token(1, &UNI.to_uppercase().replace("0X", "0x"))
            .await
            .expect("Failed to remove token");
        assert_eq!(registry.load_tokens(1).await.len(), base_tokens(1).len());

        registry.add_custom_token(1, before.last().cloned().expect("Token list is empty"))
            .await
            .expect("Failed to add token");
        assert_eq!(registry.load_tokens(1).await, before);
    }

    #[tokio::test]
    async fn test_re_adding_fresh_token_restores_list() {
        let (registry, _store) = ready_registry().await;
        registry
            .add_custom_token(1, Token::new(UNI, 1, "UNI", "Uniswap", 18))
            .await
            .expect("Failed to add token");
        let before = registry.load_tokens(1).await;

        registry.remove_custom_token(1, UNI).await.expect("Failed to remove token");
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        registry
            .add_custom_token(1, Token::new(UNI, 1, "UNI", "Uniswap", 18))
            .await
            .expect("Failed to add token");

        assert_eq!(registry.load_tokens(1).await, before);
    }

    #[tokio::test]
    async fn test_uninitialized_context_serves_base_list() {
        let context = Arc::new(AppContext::new(Arc::new(MockSettingsRepository::new())));
        let registry = TokenRegistry::new(context);

        assert_eq!(registry.load_tokens(1).await, base_tokens(1).to_vec());
        assert!(registry.load_tokens(424242).await.is_empty());
        assert!(registry.find_token(1, USDC).await.is_some());
        assert!(registry.add_custom_token(1, Token::new(UNI, 1, "UNI", "Uniswap", 18)).await.is_err());
    }

    #[test]
    fn test_storage_failure_yields_empty() {
        let mut settings = MockSettingsRepository::new();
        settings.expect_load().returning(|| Ok(()));
        settings.expect_get_slippage().returning(|| Ok(0.5));
        settings.expect_get_expert_mode().returning(|| Ok(false));
        settings
            .expect_get_custom_tokens()
            .returning(|_| Err(WalletError::storage("disk gone")));
        let context = Arc::new(AppContext::new(Arc::new(settings)));
        let registry = TokenRegistry::new(context.clone());

        tokio_test::block_on(async {
            context.init().await.expect("Failed to initialize context");
            assert!(registry.load_tokens(1).await.is_empty());
        });
    }
}
