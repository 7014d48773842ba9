//! Utility functions for the swap core
//!
//! This module contains common utility functions used throughout the swap core.

use crate::shared::constants::{ADDRESS_LENGTH, NATIVE_TOKEN_ADDRESS};
use crate::shared::error::WalletError;
use chrono::{DateTime, Utc};

/// Get current time as UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Validate Ethereum address format
pub fn validate_ethereum_address(address: &str) -> Result<(), WalletError> {
    if !address.starts_with("0x") {
        return Err(WalletError::validation("Address must start with 0x"));
    }

    if address.len() != ADDRESS_LENGTH {
        return Err(WalletError::validation("Address must be 42 characters long"));
    }

    // Check if all characters after 0x are valid hex
    if !address[2..].chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(WalletError::validation("Address contains invalid hex characters"));
    }

    Ok(())
}

/// Case-folded registry key for an address; checksum casing is ignored
pub fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

pub fn addresses_equal(a: &str, b: &str) -> bool {
    normalize_address(a) == normalize_address(b)
}

pub fn is_native_address(address: &str) -> bool {
    addresses_equal(address, NATIVE_TOKEN_ADDRESS)
}

/// Convert hex string to bytes
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, WalletError> {
    let hex = hex.trim_start_matches("0x");
    Ok(hex::decode(hex)?)
}
