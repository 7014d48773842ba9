//! Domain entities and value objects
//!
//! This module contains the core domain entities and value objects
//! that represent the business concepts in the swap core.

pub mod token;
pub mod account;
pub mod router;
pub mod allowance;
pub mod quote;

// Re-export entities
pub use token::*;
pub use account::*;
pub use router::*;
pub use allowance::*;
pub use quote::*;
