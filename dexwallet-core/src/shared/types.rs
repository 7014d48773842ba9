use serde::{Deserialize, Serialize};

// Basic types for swap operations
pub type Address = String;
pub type ChainId = u64;
/// Decimal amount in display units, exactly as typed or computed ("1.5", "1.", "")
pub type DecimalString = String;

/// Which side of the trade the user is editing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum ActiveInput {
    From,
    To,
    #[default]
    None,
}

impl ActiveInput {
    pub fn name(&self) -> &'static str {
        match self {
            ActiveInput::From => "from",
            ActiveInput::To => "to",
            ActiveInput::None => "none",
        }
    }
}

/// Kind of DEX router a spender address belongs to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RouterType {
    UniswapV2,
    UniswapV3,
    PancakeSwapV2,
    SushiSwap,
    QuickSwap,
}

impl RouterType {
    pub fn name(&self) -> &'static str {
        match self {
            RouterType::UniswapV2 => "Uniswap V2",
            RouterType::UniswapV3 => "Uniswap V3",
            RouterType::PancakeSwapV2 => "PancakeSwap V2",
            RouterType::SushiSwap => "SushiSwap",
            RouterType::QuickSwap => "QuickSwap",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_input_default() {
        assert_eq!(ActiveInput::default(), ActiveInput::None);
        assert_eq!(ActiveInput::From.name(), "from");
        assert_eq!(ActiveInput::To.name(), "to");
    }

    #[test]
    fn test_router_type_serde() {
        let json = serde_json::to_string(&RouterType::PancakeSwapV2)
            .expect("Failed to serialize router type");
        assert_eq!(json, "\"PancakeSwapV2\"");
        let parsed: RouterType = serde_json::from_str(&json)
            .expect("Failed to deserialize router type");
        assert_eq!(parsed, RouterType::PancakeSwapV2);
    }
}
