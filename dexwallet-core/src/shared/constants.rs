//! Constants for the swap core
//!
//! This module contains the static chain, token and router tables plus the
//! numeric limits used throughout the swap core.

use crate::shared::types::RouterType;

// Slippage constants (percent)
pub const DEFAULT_SLIPPAGE_PERCENT: f64 = 0.5;
pub const MIN_SLIPPAGE_PERCENT: f64 = 0.0;
pub const MAX_SLIPPAGE_PERCENT: f64 = 100.0;

/// Minimum fractional digits kept by slippage math (18-decimal tokens)
pub const AMOUNT_PRECISION: u32 = 18;

// Storage constants
pub const APP_STATE_STORAGE_KEY: &str = "dexwallet_app_state";
pub const APP_STATE_VERSION: &str = "1.0.0";
pub const STORAGE_DIR_NAME: &str = "dexwallet";

// ERC-20 function signatures; selectors are derived with keccak256
pub const ERC20_ALLOWANCE_SIGNATURE: &str = "allowance(address,address)";
pub const ERC20_APPROVE_SIGNATURE: &str = "approve(address,uint256)";

// Validation constants
pub const ADDRESS_LENGTH: usize = 42; // 0x + 40 hex chars
pub const MAX_TOKEN_SYMBOL_LENGTH: usize = 32;
pub const MAX_TOKEN_DECIMALS: u8 = 36;

/// Placeholder address used for a chain's native asset
pub const NATIVE_TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

// Chain ids
pub const ETHEREUM_CHAIN_ID: u64 = 1;
pub const BSC_CHAIN_ID: u64 = 56;
pub const POLYGON_CHAIN_ID: u64 = 137;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

pub const DEFAULT_CHAIN_ID: u64 = ETHEREUM_CHAIN_ID;

// Network configurations
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub chain_id: u64,
    pub name: &'static str,
    pub rpc_url: &'static str,
    pub native_currency: &'static str,
}

pub static ETHEREUM_CONFIG: NetworkConfig = NetworkConfig {
    chain_id: ETHEREUM_CHAIN_ID,
    name: "Ethereum",
    rpc_url: "https://eth.llamarpc.com",
    native_currency: "ETH",
};

pub static BSC_CONFIG: NetworkConfig = NetworkConfig {
    chain_id: BSC_CHAIN_ID,
    name: "BNB Smart Chain",
    rpc_url: "https://bsc-dataseed.binance.org",
    native_currency: "BNB",
};

pub static POLYGON_CONFIG: NetworkConfig = NetworkConfig {
    chain_id: POLYGON_CHAIN_ID,
    name: "Polygon",
    rpc_url: "https://polygon-rpc.com",
    native_currency: "MATIC",
};

pub static SEPOLIA_CONFIG: NetworkConfig = NetworkConfig {
    chain_id: SEPOLIA_CHAIN_ID,
    name: "Sepolia",
    rpc_url: "https://rpc.sepolia.org",
    native_currency: "ETH",
};

pub static SUPPORTED_NETWORKS: &[&NetworkConfig] = &[
    &ETHEREUM_CONFIG,
    &BSC_CONFIG,
    &POLYGON_CONFIG,
    &SEPOLIA_CONFIG,
];

// Token configurations
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    pub address: &'static str,
    pub is_native: bool,
}

pub static ETHEREUM_TOKENS: &[TokenConfig] = &[
    TokenConfig {
        symbol: "ETH",
        name: "Ether",
        decimals: 18,
        address: NATIVE_TOKEN_ADDRESS,
        is_native: true,
    },
    TokenConfig {
        symbol: "WETH",
        name: "Wrapped Ether",
        decimals: 18,
        address: "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2",
        is_native: false,
    },
    TokenConfig {
        symbol: "USDC",
        name: "USD Coin",
        decimals: 6,
        address: "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48",
        is_native: false,
    },
    TokenConfig {
        symbol: "USDT",
        name: "Tether USD",
        decimals: 6,
        address: "0xdAC17F958D2ee523a2206206994597C13D831ec7",
        is_native: false,
    },
    TokenConfig {
        symbol: "DAI",
        name: "Dai Stablecoin",
        decimals: 18,
        address: "0x6B175474E89094C44Da98b954EedeAC495271d0F",
        is_native: false,
    },
];

pub static BSC_TOKENS: &[TokenConfig] = &[
    TokenConfig {
        symbol: "BNB",
        name: "BNB",
        decimals: 18,
        address: NATIVE_TOKEN_ADDRESS,
        is_native: true,
    },
    TokenConfig {
        symbol: "WBNB",
        name: "Wrapped BNB",
        decimals: 18,
        address: "0xbb4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c",
        is_native: false,
    },
    TokenConfig {
        symbol: "USDT",
        name: "Tether USD",
        decimals: 18,
        address: "0x55d398326f99059fF775485246999027B3197955",
        is_native: false,
    },
    TokenConfig {
        symbol: "BUSD",
        name: "Binance USD",
        decimals: 18,
        address: "0xe9e7CEA3DedcA5984780Bafc599bD69ADd087D56",
        is_native: false,
    },
];

pub static POLYGON_TOKENS: &[TokenConfig] = &[
    TokenConfig {
        symbol: "MATIC",
        name: "Polygon",
        decimals: 18,
        address: NATIVE_TOKEN_ADDRESS,
        is_native: true,
    },
    TokenConfig {
        symbol: "WMATIC",
        name: "Wrapped Matic",
        decimals: 18,
        address: "0x0d500B1d8E8eF31E21C99d1Db9A6444d3ADf1270",
        is_native: false,
    },
    TokenConfig {
        symbol: "USDC.e",
        name: "Bridged USD Coin",
        decimals: 6,
        address: "0x2791Bca1f2de4661ED88A30C99A7a9449Aa84174",
        is_native: false,
    },
];

pub static SEPOLIA_TOKENS: &[TokenConfig] = &[
    TokenConfig {
        symbol: "ETH",
        name: "Sepolia Ether",
        decimals: 18,
        address: NATIVE_TOKEN_ADDRESS,
        is_native: true,
    },
    TokenConfig {
        symbol: "WETH",
        name: "Wrapped Ether",
        decimals: 18,
        address: "0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14",
        is_native: false,
    },
];

// Router configurations, index 0 is the default spender for a chain
#[derive(Debug, Clone)]
pub struct RouterConfigEntry {
    pub address: &'static str,
    pub router_type: RouterType,
}

pub static ETHEREUM_ROUTERS: &[RouterConfigEntry] = &[
    RouterConfigEntry {
        address: "0x7a250d5630B4cF539739dF2C5dAcb4c659F2488D",
        router_type: RouterType::UniswapV2,
    },
    RouterConfigEntry {
        address: "0xd9e1cE17f2641f24aE83637ab66a2cca9C378B9F",
        router_type: RouterType::SushiSwap,
    },
];

pub static BSC_ROUTERS: &[RouterConfigEntry] = &[RouterConfigEntry {
    address: "0x10ED43C718714eb63d5aA57B78B54704E256024E",
    router_type: RouterType::PancakeSwapV2,
}];

pub static POLYGON_ROUTERS: &[RouterConfigEntry] = &[RouterConfigEntry {
    address: "0xa5E0829CaCEd8fFDD4De3c43696c57F7D7A678ff",
    router_type: RouterType::QuickSwap,
}];

// Sepolia intentionally has no router: swaps there always require approval
