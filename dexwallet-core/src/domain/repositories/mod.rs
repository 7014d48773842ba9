//! Domain repositories
//!
//! This module contains the collaborator traits the core calls into:
//! persisted settings, on-chain reads and swap quotes.

pub mod settings_repository;
pub mod contract_repository;
pub mod quote_repository;

// Re-export repositories
pub use settings_repository::*;
pub use contract_repository::*;
pub use quote_repository::*;
