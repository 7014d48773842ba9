//! Infrastructure layer - platform-specific implementations
//!
//! Storage backends, configuration loading and the JSON-RPC gateway the
//! core reaches the chain through.

pub mod config;
pub mod platform;
pub mod rpc;

// Re-export infrastructure components
pub use config::*;
pub use platform::*;
pub use rpc::*;
