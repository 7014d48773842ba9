//! Core swap functionality
//!
//! Amount math, token and router registries, allowance resolution, the
//! display engine and the session that drives them from input events.

pub mod math;
pub mod tokens;
pub mod routers;
pub mod allowance;
pub mod swap;
pub mod session;
pub mod settings;
pub mod notifications;
pub mod context;
