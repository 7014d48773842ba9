//! JSON-RPC contract reads
//!
//! ERC-20 `allowance` via `eth_call`, plus calldata encoding for the
//! `approve` transaction the wallet signs when an approval is required.

use crate::core::math::PreciseAmount;
use crate::domain::entities::Token;
use crate::domain::repositories::ContractRepository;
use crate::infrastructure::config::CoreConfig;
use crate::shared::constants::{ERC20_ALLOWANCE_SIGNATURE, ERC20_APPROVE_SIGNATURE};
use crate::shared::error::WalletError;
use crate::shared::types::{ChainId, DecimalString};
use crate::shared::utils::{hex_to_bytes, validate_ethereum_address};
use async_trait::async_trait;
use ethers::abi::{self, ParamType, Token as AbiToken};
use ethers::types::{Address as EthAddress, U256};
use ethers::utils::id;
use num_bigint::BigUint;
use reqwest::Client;
use serde_json::json;
use std::collections::HashMap;

/// Contract reader backed by per-chain JSON-RPC endpoints
pub struct RpcContractReader {
    client: Client,
    rpc_urls: HashMap<ChainId, String>,
}

impl RpcContractReader {
    pub fn new(rpc_urls: HashMap<ChainId, String>) -> Self {
        Self {
            client: Client::new(),
            rpc_urls,
        }
    }

    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(config.resolved_rpc_urls())
    }

    fn rpc_url(&self, chain_id: ChainId) -> Result<&str, WalletError> {
        self.rpc_urls
            .get(&chain_id)
            .map(String::as_str)
            .ok_or_else(|| WalletError::config(format!("No RPC URL configured for chain {}", chain_id)))
    }

    async fn eth_call(&self, chain_id: ChainId, to: &str, data: &str) -> Result<String, WalletError> {
        let rpc_url = self.rpc_url(chain_id)?;
        let body = json!({
            "jsonrpc": "2.0",
            "method": "eth_call",
            "params": [{ "to": to, "data": data }, "latest"],
            "id": 1
        });
        let resp_json: serde_json::Value = self
            .client
            .post(rpc_url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = resp_json.get("error") {
            return Err(WalletError::contract_read(format!("RPC error: {}", error)));
        }
        resp_json
            .get("result")
            .and_then(|r| r.as_str())
            .map(str::to_string)
            .ok_or_else(|| WalletError::contract_read("No result returned"))
    }
}

#[async_trait]
impl ContractRepository for RpcContractReader {
    async fn read_allowance(
        &self,
        token: &Token,
        owner: &str,
        spender: &str,
        chain_id: ChainId,
    ) -> Result<DecimalString, WalletError> {
        if token.is_native_asset() {
            return Err(WalletError::validation("Native assets have no allowance"));
        }
        let data = encode_allowance_call(owner, spender)?;
        let result = self.eth_call(chain_id, &token.address, &data).await?;
        let units = decode_uint256(&result)?;
        log::debug!(
            "Allowance of {} for {} on chain {}: {} units",
            token.symbol,
            spender,
            chain_id,
            units
        );
        Ok(PreciseAmount::from_base_units(units, token.decimals).to_string())
    }
}

fn parse_address(address: &str) -> Result<EthAddress, WalletError> {
    let address = address.trim();
    validate_ethereum_address(address)?;
    address
        .parse::<EthAddress>()
        .map_err(|e| WalletError::validation(format!("Invalid address {}: {}", address, e)))
}

// Selector is the first four bytes of keccak256(signature)
fn encode_call(signature: &str, args: &[AbiToken]) -> String {
    let mut data = id(signature).to_vec();
    data.extend(abi::encode(args));
    format!("0x{}", hex::encode(data))
}

/// Calldata for `allowance(address owner, address spender)`
pub fn encode_allowance_call(owner: &str, spender: &str) -> Result<String, WalletError> {
    Ok(encode_call(
        ERC20_ALLOWANCE_SIGNATURE,
        &[
            AbiToken::Address(parse_address(owner)?),
            AbiToken::Address(parse_address(spender)?),
        ],
    ))
}

/// Calldata for `approve(address spender, uint256 amount)`
pub fn encode_approve_call(spender: &str, amount: &BigUint) -> Result<String, WalletError> {
    let bytes = amount.to_bytes_be();
    if bytes.len() > 32 {
        return Err(WalletError::validation("Approval amount exceeds uint256"));
    }
    Ok(encode_call(
        ERC20_APPROVE_SIGNATURE,
        &[
            AbiToken::Address(parse_address(spender)?),
            AbiToken::Uint(U256::from_big_endian(&bytes)),
        ],
    ))
}

/// Approve calldata for a display amount of `token`
pub fn build_approve_calldata(token: &Token, spender: &str, amount: &str) -> Result<String, WalletError> {
    if token.is_native_asset() {
        return Err(WalletError::validation("Native assets cannot be approved"));
    }
    let amount: PreciseAmount = amount.parse()?;
    encode_approve_call(spender, &amount.to_base_units(token.decimals))
}

/// Decode a single ABI `uint256` return value
pub fn decode_uint256(result: &str) -> Result<BigUint, WalletError> {
    let malformed = || WalletError::contract_read(format!("Malformed uint256 return data: {:?}", result));
    let data = hex_to_bytes(result).map_err(|_| malformed())?;
    if data.is_empty() {
        return Err(WalletError::contract_read("Empty return data, not a token contract?"));
    }
    let value = match abi::decode(&[ParamType::Uint(256)], &data).map_err(|_| malformed())?.pop() {
        Some(AbiToken::Uint(value)) => value,
        _ => return Err(malformed()),
    };
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    Ok(BigUint::from_bytes_be(&word))
}
