//! DexWallet Core
//!
//! Client-side swap core for a multi-chain DeFi wallet.
//! Decides what a swap form displays and whether a token approval has to
//! be sent first. Execution, routing through pools and UI stay with the host.
//!
//! ## Architecture
//!
//! - **Core**: amount math, token/router registries, allowance resolver,
//!   display engine, swap session
//! - **Domain**: entities and the repository traits for external collaborators
//! - **Infrastructure**: storage backends, configuration, JSON-RPC gateway
//! - **Shared**: common types, constants, and utilities
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dexwallet_core::{init_swap_core, SwapEvent};
//!
//! # async fn run() -> Result<(), dexwallet_core::WalletError> {
//! let core = init_swap_core().await?;
//! let mut session = core.new_session().await?;
//!
//! session.dispatch(SwapEvent::FromTyped("1.5".to_string()));
//! println!("receive at least {}", session.display().to);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod shared;
pub mod infrastructure;

use crate::infrastructure::rpc::build_approve_calldata;
use std::sync::Arc;

// Re-export specific components
pub use crate::core::allowance::{AllowanceQuery, AllowanceResolver};
pub use crate::core::context::AppContext;
pub use crate::core::math::{apply_slippage_decrease, apply_slippage_increase, PreciseAmount};
pub use crate::core::notifications::{LogNotificationSink, NotificationSink};
pub use crate::core::routers::RouterRegistry;
pub use crate::core::session::{RecomputeTicket, SwapEvent, SwapSession};
pub use crate::core::settings::{AppStateStore, PersistedAppState};
pub use crate::core::swap::{derive_display, format_display_amount};
pub use crate::core::tokens::TokenRegistry;

// Re-export domain entities
pub use crate::domain::{AccountState, AllowanceRecord, SwapDisplay, SwapQuoteState, Token};
pub use crate::domain::{ContractRepository, QuoteRepository, SettingsRepository};

// Re-export infrastructure and shared types
pub use crate::infrastructure::{CoreConfig, FileStorage, MemoryStorage, PlatformStorage, RpcContractReader};
pub use crate::shared::error::WalletError;
pub use crate::shared::types::{ActiveInput, ChainId};

/// Initialize logging from the configured level (`RUST_LOG` wins)
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let config = CoreConfig::load()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level.as_str()))
        .try_init()?;
    Ok(())
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Initialize the swap core with configuration from `dexwallet.toml`, `.env`
/// and the environment
pub async fn init_swap_core() -> Result<SwapCore, WalletError> {
    init_swap_core_with(CoreConfig::load()?).await
}

pub async fn init_swap_core_with(config: CoreConfig) -> Result<SwapCore, WalletError> {
    config.validate()?;
    let storage = match &config.storage_dir {
        Some(dir) => FileStorage::with_dir(dir)?,
        None => FileStorage::new()?,
    };
    log::info!("Swap core storage at {}", storage.base_dir().display());

    let store = Arc::new(AppStateStore::new(storage).with_default_slippage(config.default_slippage));
    let gateway: Arc<dyn ContractRepository> = Arc::new(RpcContractReader::from_config(&config));
    SwapCore::from_parts(config, store, gateway).await
}

/// Main swap core struct that provides access to all functionality
pub struct SwapCore {
    pub config: CoreConfig,
    pub context: Arc<AppContext>,
    pub tokens: TokenRegistry,
    pub allowance: AllowanceResolver,
    settings: Arc<dyn SettingsRepository>,
}

impl SwapCore {
    /// Assemble from explicit collaborators; initializing the context loads
    /// the persisted settings
    pub async fn from_parts(
        config: CoreConfig,
        settings: Arc<dyn SettingsRepository>,
        gateway: Arc<dyn ContractRepository>,
    ) -> Result<Self, WalletError> {
        let context = Arc::new(AppContext::new(Arc::clone(&settings)));
        context.init().await?;
        Ok(Self {
            config,
            tokens: TokenRegistry::new(Arc::clone(&context)),
            allowance: AllowanceResolver::new(gateway, RouterRegistry::new()),
            context,
            settings,
        })
    }

    /// Fresh session with the saved preferences on the default chain
    pub async fn new_session(&self) -> Result<SwapSession, WalletError> {
        let slippage = self.settings.get_slippage().await?;
        let expert_mode = self.settings.get_expert_mode().await?;
        let mut session = SwapSession::new(slippage, expert_mode);
        session.dispatch(SwapEvent::ChainChanged(Some(self.config.default_chain_id)));
        Ok(session)
    }

    /// Persist and apply a slippage change; out-of-range values are ignored
    pub async fn set_slippage(&self, session: &mut SwapSession, value: f64) -> Result<bool, WalletError> {
        let accepted = self.settings.set_slippage(value).await?;
        if accepted {
            session.dispatch(SwapEvent::SlippageChanged(value));
        }
        Ok(accepted)
    }

    pub async fn set_expert_mode(&self, session: &mut SwapSession, enabled: bool) -> Result<(), WalletError> {
        self.settings.set_expert_mode(enabled).await?;
        session.dispatch(SwapEvent::ExpertModeChanged(enabled));
        Ok(())
    }

    /// `approve` calldata for the session's pending approval. Failures are
    /// user-facing and go to the notification sink.
    pub fn approval_calldata(&self, session: &SwapSession) -> Result<String, WalletError> {
        let result = Self::build_approval(session);
        if let Err(e) = &result {
            self.context.notify_approval_failed(&e.to_string());
        }
        result
    }

    fn build_approval(session: &SwapSession) -> Result<String, WalletError> {
        let record = session
            .allowance()
            .filter(|r| r.needs_approval)
            .ok_or_else(|| WalletError::validation("No approval pending"))?;
        let spender = record
            .spender
            .as_deref()
            .ok_or_else(|| WalletError::config("No router to approve on this chain"))?;
        let (token, _) = session.tokens();
        let token = token.ok_or_else(|| WalletError::validation("No token selected"))?;
        build_approve_calldata(token, spender, &record.required_amount)
    }

    pub fn notify_copied(&self, label: &str) {
        self.context.notify_copied(label);
    }
}

impl Drop for SwapCore {
    fn drop(&mut self) {
        log::info!("SwapCore dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notifications::MockNotificationSink;
    use crate::domain::repositories::MockContractRepository;

    async fn test_core(dir: &std::path::Path, gateway: MockContractRepository) -> SwapCore {
        let config = CoreConfig {
            storage_dir: dir.to_str().map(str::to_string),
            ..CoreConfig::default()
        };
        let store = Arc::new(AppStateStore::new(
            FileStorage::with_dir(dir).expect("Failed to create storage"),
        ));
        SwapCore::from_parts(config, store, Arc::new(gateway))
            .await
            .expect("Failed to initialize swap core")
    }

    #[tokio::test]
    async fn test_swap_core_initialization() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = CoreConfig {
            storage_dir: dir.path().to_str().map(str::to_string),
            default_slippage: 1.0,
            ..CoreConfig::default()
        };
        let core = init_swap_core_with(config).await.expect("Failed to initialize swap core");
        assert!(core.context.is_ready());

        let session = core.new_session().await.expect("Failed to create session");
        assert_eq!(session.state().slippage, 1.0);
        assert_eq!(session.chain_id(), Some(core.config.default_chain_id));
        assert!(!core.tokens.load_tokens(session.chain_id().unwrap_or_default()).await.is_empty());
    }

    #[tokio::test]
    async fn test_preferences_persist() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let core = test_core(dir.path(), MockContractRepository::new()).await;
        let mut session = core.new_session().await.expect("Failed to create session");

        assert!(core.set_slippage(&mut session, 3.0).await.expect("Failed to set slippage"));
        assert!(!core.set_slippage(&mut session, 300.0).await.expect("Failed to set slippage"));
        core.set_expert_mode(&mut session, true).await.expect("Failed to set expert mode");
        assert_eq!(session.state().slippage, 3.0);
        drop(core);

        let core = test_core(dir.path(), MockContractRepository::new()).await;
        let session = core.new_session().await.expect("Failed to create session");
        assert_eq!(session.state().slippage, 3.0);
        assert!(session.state().expert_mode);
    }

    #[tokio::test]
    async fn test_approval_flow() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut gateway = MockContractRepository::new();
        gateway.expect_read_allowance().returning(|_, _, _, _| Ok("0".to_string()));
        let core = test_core(dir.path(), gateway).await;

        let mut session = core.new_session().await.expect("Failed to create session");
        let usdc = core
            .tokens
            .find_token(1, "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")
            .await
            .expect("USDC missing");
        let weth = core
            .tokens
            .find_token(1, "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")
            .await
            .expect("WETH missing");
        session.dispatch(SwapEvent::AccountChanged(AccountState::connected(
            "0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b6",
            1,
        )));
        session.dispatch(SwapEvent::TokensChanged { from: Some(usdc), to: Some(weth) });
        let ticket = session.dispatch(SwapEvent::FromTyped("2.5".to_string()));

        let record = core.allowance.resolve(&session.allowance_query()).await;
        assert!(session.apply_allowance(ticket, record));
        assert!(session.needs_approval());

        let calldata = core.approval_calldata(&session).expect("Failed to build calldata");
        // 2.5 USDC = 2_500_000 = 0x2625a0
        assert!(calldata.starts_with("0x095ea7b3"));
        assert!(calldata.ends_with("2625a0"));
    }

    #[tokio::test]
    async fn test_approval_failure_is_notified() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let core = test_core(dir.path(), MockContractRepository::new()).await;

        let mut sink = MockNotificationSink::new();
        sink.expect_error().times(1).return_const(());
        core.context.set_notifier(Arc::new(sink));

        let session = core.new_session().await.expect("Failed to create session");
        assert!(core.approval_calldata(&session).is_err());
    }
}
