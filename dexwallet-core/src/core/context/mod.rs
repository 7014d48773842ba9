//! Application context
//!
//! Constructed explicitly and handed to the registries. Nothing here is a
//! process-wide global, so tests can build as many contexts as they need.

use crate::core::notifications::{LogNotificationSink, NotificationSink};
use crate::domain::repositories::SettingsRepository;
use crate::shared::error::WalletError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

pub struct AppContext {
    settings: Arc<dyn SettingsRepository>,
    notifier: RwLock<Option<Arc<dyn NotificationSink>>>,
    initialized: AtomicBool,
}

impl AppContext {
    pub fn new(settings: Arc<dyn SettingsRepository>) -> Self {
        Self {
            settings,
            notifier: RwLock::new(None),
            initialized: AtomicBool::new(false),
        }
    }

    /// Load persisted settings and mark the context ready
    pub async fn init(&self) -> Result<(), WalletError> {
        log::info!("Initializing application context");
        self.settings.load().await?;
        let slippage = self.settings.get_slippage().await?;
        let expert_mode = self.settings.get_expert_mode().await?;
        self.initialized.store(true, Ordering::SeqCst);
        log::info!(
            "Application context ready (slippage {}%, expert mode {})",
            slippage,
            expert_mode
        );
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Settings store, `None` until `init` succeeded
    pub fn settings(&self) -> Option<Arc<dyn SettingsRepository>> {
        if self.is_ready() {
            Some(Arc::clone(&self.settings))
        } else {
            None
        }
    }

    pub fn set_notifier(&self, sink: Arc<dyn NotificationSink>) {
        match self.notifier.write() {
            Ok(mut guard) => *guard = Some(sink),
            Err(_) => log::error!("Notifier lock poisoned; keeping the log sink"),
        }
    }

    fn notifier(&self) -> Arc<dyn NotificationSink> {
        self.notifier
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| Arc::new(LogNotificationSink))
    }

    pub fn notify_copied(&self, label: &str) {
        self.notifier().success(&format!("{} copied to clipboard", label));
    }

    pub fn notify_approval_failed(&self, reason: &str) {
        self.notifier().error(&format!("Approval failed: {}", reason));
    }
}
