//! Persisted application state
//!
//! A single JSON document under one storage key holds the user's custom
//! tokens, slippage and expert-mode flag. Reads are served from an in-memory
//! cache; every write goes through to storage before the cache is updated.

use crate::domain::entities::Token;
use crate::domain::repositories::SettingsRepository;
use crate::infrastructure::platform::PlatformStorage;
use crate::shared::constants::{
    APP_STATE_STORAGE_KEY, APP_STATE_VERSION, DEFAULT_SLIPPAGE_PERCENT, MAX_SLIPPAGE_PERCENT,
    MIN_SLIPPAGE_PERCENT,
};
use crate::shared::error::WalletError;
use crate::shared::types::ChainId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

fn default_slippage() -> f64 {
    DEFAULT_SLIPPAGE_PERCENT
}

fn default_version() -> String {
    APP_STATE_VERSION.to_string()
}

pub fn is_valid_slippage(value: f64) -> bool {
    value.is_finite() && (MIN_SLIPPAGE_PERCENT..=MAX_SLIPPAGE_PERCENT).contains(&value)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PersistedAppState {
    #[serde(default)]
    pub custom_tokens: BTreeMap<ChainId, Vec<Token>>,
    #[serde(default = "default_slippage")]
    pub slippage: f64,
    #[serde(default)]
    pub expert_mode: bool,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for PersistedAppState {
    fn default() -> Self {
        Self {
            custom_tokens: BTreeMap::new(),
            slippage: DEFAULT_SLIPPAGE_PERCENT,
            expert_mode: false,
            version: default_version(),
        }
    }
}

/// `SettingsRepository` over any key-value `PlatformStorage`
pub struct AppStateStore<S: PlatformStorage> {
    storage: S,
    default_slippage: f64,
    state: RwLock<PersistedAppState>,
}

impl<S: PlatformStorage> AppStateStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            default_slippage: DEFAULT_SLIPPAGE_PERCENT,
            state: RwLock::new(PersistedAppState::default()),
        }
    }

    /// Slippage used when nothing has been saved yet
    pub fn with_default_slippage(mut self, slippage: f64) -> Self {
        if is_valid_slippage(slippage) {
            self.default_slippage = slippage;
            self.state.get_mut().slippage = slippage;
        } else {
            log::warn!("Ignoring out-of-range default slippage {}", slippage);
        }
        self
    }

    pub async fn snapshot(&self) -> PersistedAppState {
        self.state.read().await.clone()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // Persist first, then swap the cache so a failed write changes nothing.
    // `mutate` runs under the write guard and returns false to skip the write.
    async fn update<F>(&self, mutate: F) -> Result<bool, WalletError>
    where
        F: FnOnce(&mut PersistedAppState) -> bool,
    {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        if !mutate(&mut next) {
            return Ok(false);
        }
        let bytes = serde_json::to_vec_pretty(&next)?;
        self.storage.store(APP_STATE_STORAGE_KEY, &bytes)?;
        *guard = next;
        Ok(true)
    }
}

#[async_trait]
impl<S: PlatformStorage> SettingsRepository for AppStateStore<S> {
    /// A missing document keeps the defaults; an unreadable one is logged
    /// and deleted so the next write starts from defaults.
    async fn load(&self) -> Result<(), WalletError> {
        if !self.storage.exists(APP_STATE_STORAGE_KEY)? {
            log::info!("No persisted app state, using defaults");
            return Ok(());
        }

        let bytes = self.storage.retrieve(APP_STATE_STORAGE_KEY)?;
        let mut loaded: PersistedAppState = match serde_json::from_slice(&bytes) {
            Ok(state) => state,
            Err(e) => {
                log::warn!("Discarding unreadable app state: {}", e);
                self.storage.delete(APP_STATE_STORAGE_KEY)?;
                return Ok(());
            }
        };

        if !is_valid_slippage(loaded.slippage) {
            log::warn!("Persisted slippage {} out of range, resetting", loaded.slippage);
            loaded.slippage = self.default_slippage;
        }
        if loaded.version != APP_STATE_VERSION {
            log::info!("Upgrading app state from version {}", loaded.version);
            loaded.version = default_version();
        }

        let token_count: usize = loaded.custom_tokens.values().map(Vec::len).sum();
        log::info!(
            "Loaded app state: {} custom token(s), slippage {}%",
            token_count,
            loaded.slippage
        );
        *self.state.write().await = loaded;
        Ok(())
    }

    async fn get_custom_tokens(&self, chain_id: ChainId) -> Result<Vec<Token>, WalletError> {
        Ok(self
            .state
            .read()
            .await
            .custom_tokens
            .get(&chain_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn add_custom_token(&self, chain_id: ChainId, token: Token) -> Result<(), WalletError> {
        let token = token.into_custom(chain_id);
        let (symbol, address) = (token.symbol.clone(), token.address.clone());
        let added = self
            .update(|state| {
                let tokens = state.custom_tokens.entry(chain_id).or_default();
                if tokens.iter().any(|t| t.has_address(&token.address)) {
                    return false;
                }
                tokens.push(token);
                true
            })
            .await?;

        if added {
            log::info!("Added custom token {} ({}) on chain {}", symbol, address, chain_id);
        } else {
            log::debug!("Custom token {} already stored for chain {}", address, chain_id);
        }
        Ok(())
    }

    async fn remove_custom_token(&self, chain_id: ChainId, address: &str) -> Result<(), WalletError> {
        let removed = self
            .update(|state| {
                let Some(tokens) = state.custom_tokens.get_mut(&chain_id) else {
                    return false;
                };
                let before = tokens.len();
                tokens.retain(|t| !t.has_address(address));
                if tokens.len() == before {
                    return false;
                }
                if tokens.is_empty() {
                    state.custom_tokens.remove(&chain_id);
                }
                true
            })
            .await?;

        if removed {
            log::info!("Removed custom token {} on chain {}", address, chain_id);
        }
        Ok(())
    }

    async fn get_slippage(&self) -> Result<f64, WalletError> {
        Ok(self.state.read().await.slippage)
    }

    async fn set_slippage(&self, value: f64) -> Result<bool, WalletError> {
        if !is_valid_slippage(value) {
            log::warn!("Rejected slippage {}", value);
            return Ok(false);
        }
        self.update(|state| {
            state.slippage = value;
            true
        })
        .await
    }

    async fn get_expert_mode(&self) -> Result<bool, WalletError> {
        Ok(self.state.read().await.expert_mode)
    }

    async fn set_expert_mode(&self, enabled: bool) -> Result<(), WalletError> {
        self.update(|state| {
            state.expert_mode = enabled;
            true
        })
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::{FileStorage, MemoryStorage};

    const UNI: &str = "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984";

    fn uni() -> Token {
        Token::new(UNI, 1, "UNI", "Uniswap", 18)
    }

    #[tokio::test]
    async fn test_defaults_without_persisted_state() {
        let store = AppStateStore::new(MemoryStorage::new());
        store.load().await.expect("Failed to load store");

        assert_eq!(store.get_slippage().await.expect("Failed to read slippage"), 0.5);
        assert!(!store.get_expert_mode().await.expect("Failed to read expert mode"));
        assert!(store.get_custom_tokens(1).await.expect("Failed to read tokens").is_empty());
    }

    #[tokio::test]
    async fn test_out_of_range_slippage_is_not_persisted() {
        let store = AppStateStore::new(MemoryStorage::new());

        assert!(store.set_slippage(2.5).await.expect("Failed to set slippage"));
        assert!(!store.set_slippage(100.5).await.expect("Failed to set slippage"));
        assert!(!store.set_slippage(-1.0).await.expect("Failed to set slippage"));
        assert!(!store.set_slippage(f64::NAN).await.expect("Failed to set slippage"));
        assert_eq!(store.get_slippage().await.expect("Failed to read slippage"), 2.5);
    }

    #[tokio::test]
    async fn test_custom_tokens_dedup_case_insensitive() {
        let store = AppStateStore::new(MemoryStorage::new());
        store.add_custom_token(1, uni()).await.expect("Failed to add token");

        let mut shouting = uni();
        shouting.address = UNI.to_uppercase().replace("0X", "0x");
        store.add_custom_token(1, shouting).await.expect("Failed to add token");

        let tokens = store.get_custom_tokens(1).await.expect("Failed to read tokens");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_custom);
        assert!(store.get_custom_tokens(56).await.expect("Failed to read tokens").is_empty());
    }

    #[tokio::test]
    async fn test_remove_then_re_add_restores_state() {
        let store = AppStateStore::new(MemoryStorage::new());
        store.add_custom_token(1, uni()).await.expect("Failed to add token");
        let before = store.get_custom_tokens(1).await.expect("Failed to read tokens");

        store.remove_custom_token(1, &UNI.to_lowercase()).await.expect("Failed to remove token");
        assert!(store.get_custom_tokens(1).await.expect("Failed to read tokens").is_empty());
        assert!(store.snapshot().await.custom_tokens.is_empty());

        store.add_custom_token(1, uni()).await.expect("Failed to add token");
        assert_eq!(store.get_custom_tokens(1).await.expect("Failed to read tokens"), before);

        // Absent address is a no-op
        store.remove_custom_token(1, "0x0000000000000000000000000000000000000001")
            .await
            .expect("Failed to remove token");
        assert_eq!(store.get_custom_tokens(1).await.expect("Failed to read tokens").len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_adds_store_one_entry() {
        let store = std::sync::Arc::new(AppStateStore::new(MemoryStorage::new()));
        let spellings = [UNI.to_string(), UNI.to_lowercase(), UNI.to_uppercase().replace("0X", "0x")];

        let handles: Vec<_> = spellings
            .iter()
            .cycle()
            .take(12)
            .cloned()
            .map(|address| {
                let store = store.clone();
                tokio::spawn(async move {
                    let mut token = uni();
                    token.address = address;
                    store.add_custom_token(1, token).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.expect("Task panicked").expect("Failed to add token");
        }

        assert_eq!(store.get_custom_tokens(1).await.expect("Failed to read tokens").len(), 1);
        let persisted: PersistedAppState = serde_json::from_slice(
            &store.storage().retrieve(APP_STATE_STORAGE_KEY).expect("Failed to read document"),
        )
        .expect("Failed to parse document");
        assert_eq!(persisted.custom_tokens[&1].len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_removes_are_idempotent() {
        let store = AppStateStore::new(MemoryStorage::new());
        store.add_custom_token(1, uni()).await.expect("Failed to add token");

        let lower = UNI.to_lowercase();
        let (a, b) = tokio::join!(
            store.remove_custom_token(1, UNI),
            store.remove_custom_token(1, &lower)
        );
        a.expect("Failed to remove token");
        b.expect("Failed to remove token");
        assert!(store.snapshot().await.custom_tokens.is_empty());
    }

    #[tokio::test]
    async fn test_state_survives_reload() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        {
            let store = AppStateStore::new(FileStorage::with_dir(dir.path()).expect("Failed to create storage"));
            store.set_slippage(1.0).await.expect("Failed to set slippage");
            store.set_expert_mode(true).await.expect("Failed to set expert mode");
            store.add_custom_token(137, uni()).await.expect("Failed to add token");
        }

        let store = AppStateStore::new(FileStorage::with_dir(dir.path()).expect("Failed to create storage"));
        store.load().await.expect("Failed to load store");
        assert_eq!(store.get_slippage().await.expect("Failed to read slippage"), 1.0);
        assert!(store.get_expert_mode().await.expect("Failed to read expert mode"));
        let tokens = store.get_custom_tokens(137).await.expect("Failed to read tokens");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].chain_id, 137);
    }

    #[tokio::test]
    async fn test_corrupt_state_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.store(APP_STATE_STORAGE_KEY, b"{not json").expect("Failed to store data");
        let store = AppStateStore::new(storage).with_default_slippage(1.0);

        store.load().await.expect("Failed to load store");
        assert_eq!(store.get_slippage().await.expect("Failed to read slippage"), 1.0);
        assert!(!store.storage().exists(APP_STATE_STORAGE_KEY).expect("Failed to check key"));

        store.set_expert_mode(true).await.expect("Failed to set expert mode");
        assert!(store.storage().exists(APP_STATE_STORAGE_KEY).expect("Failed to check key"));
    }

    #[tokio::test]
    async fn test_persisted_out_of_range_slippage_is_reset() {
        let storage = MemoryStorage::new();
        storage
            .store(APP_STATE_STORAGE_KEY, br#"{"slippage": 250.0, "expert_mode": true}"#)
            .expect("Failed to store data");
        let store = AppStateStore::new(storage);

        store.load().await.expect("Failed to load store");
        assert_eq!(store.get_slippage().await.expect("Failed to read slippage"), 0.5);
        assert!(store.get_expert_mode().await.expect("Failed to read expert mode"));
        assert_eq!(store.snapshot().await.version, APP_STATE_VERSION);
    }
}
