//! Pool records as returned by the pool indexing API. Unknown fields are ignored.

use crate::network::Chain;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPool {
    pub id: String,
    pub address: Address,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
    /// Factory version; absent for pools the API has no factory data for.
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default)]
    pub factory: Option<Address>,
    #[serde(rename = "type")]
    pub pool_type: String,
    pub chain: Chain,
    pub protocol_version: u8,
    #[serde(default)]
    pub has_erc4626: bool,
    #[serde(default)]
    pub liquidity_management: Option<ApiLiquidityManagement>,
    pub dynamic_data: ApiDynamicData,
    pub pool_tokens: Vec<ApiPoolToken>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiLiquidityManagement {
    #[serde(default)]
    pub disable_unbalanced_liquidity: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDynamicData {
    pub total_shares: String,
    #[serde(default)]
    pub is_in_recovery_mode: bool,
    #[serde(default)]
    pub is_paused: bool,
    #[serde(default)]
    pub swap_fee: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPoolToken {
    pub address: Address,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub decimals: u8,
    pub index: usize,
    #[serde(default)]
    pub balance: String,
    #[serde(default)]
    pub weight: Option<String>,
    #[serde(default)]
    pub nested_pool: Option<ApiNestedPool>,
    #[serde(default)]
    pub is_erc4626: Option<bool>,
    #[serde(default)]
    pub use_underlying_for_add_remove: Option<bool>,
    #[serde(default)]
    pub underlying_token: Option<ApiUnderlyingToken>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNestedPool {
    pub id: String,
    pub address: Address,
    #[serde(rename = "type", default)]
    pub pool_type: String,
    #[serde(default)]
    pub total_shares: Option<String>,
    #[serde(default)]
    pub tokens: Vec<ApiNestedPoolToken>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNestedPoolToken {
    pub address: Address,
    #[serde(default)]
    pub symbol: String,
    pub decimals: u8,
    pub index: usize,
    #[serde(default)]
    pub balance: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUnderlyingToken {
    pub address: Address,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub name: String,
    pub decimals: u8,
}
