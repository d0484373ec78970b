//! Turns a [`Pool`] and user amounts into the shapes the liquidity SDK consumes.
//!
//! Nothing here computes swap math, price impact or slippage.

use crate::{
    TokenLike,
    balancer::{
        classifier::{has_nested_pools, is_cow_amm_pool, is_v3_pool, supports_weth_is_eth},
        pool::{Pool, PoolType, ProtocolVersion},
    },
    core::token::{HumanTokenAmount, InputAmount, KnownToken, MinimalToken, TokenAmountToApprove},
    errors::BalRsError,
    math::units,
    network::{NetworkConfig, NetworkRegistry},
    reporting::{ErrorContext, ErrorReporter, Severity},
};
use alloy_primitives::{Address, U256};
use itertools::Itertools;
use serde::Serialize;

/// State used by the default (non-nested) SDK handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolState {
    pub id: String,
    pub address: Address,
    pub tokens: Vec<MinimalToken>,
    #[serde(rename = "type")]
    pub pool_type: String,
    pub protocol_version: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnderlyingTokenState {
    pub address: Address,
    pub decimals: u8,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolTokenWithUnderlying {
    pub address: Address,
    pub decimals: u8,
    pub index: usize,
    pub balance: String,
    /// `None` tells the SDK to operate on the wrapped token directly.
    pub underlying_token: Option<UnderlyingTokenState>,
}

/// State used by the boosted v3 SDK handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStateWithUnderlyings {
    pub id: String,
    pub address: Address,
    pub protocol_version: u8,
    #[serde(rename = "type")]
    pub pool_type: String,
    pub tokens: Vec<PoolTokenWithUnderlying>,
    pub total_shares: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedPoolStatePool {
    pub id: String,
    pub address: Address,
    #[serde(rename = "type")]
    pub pool_type: String,
    /// 0 for the nested pools, 1 for the parent.
    pub level: u8,
    pub tokens: Vec<MinimalToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainToken {
    pub address: Address,
    pub decimals: u8,
}

/// State used by the nested SDK handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NestedPoolState {
    pub protocol_version: u8,
    pub pools: Vec<NestedPoolStatePool>,
    pub main_tokens: Vec<MainToken>,
}

/// SDK pool type names for pools before v3. v3 pools keep the API tag.
fn legacy_sdk_pool_type(pool_type: &PoolType) -> Option<&'static str> {
    match pool_type {
        PoolType::Weighted => Some("Weighted"),
        PoolType::Stable => Some("Stable"),
        PoolType::MetaStable => Some("MetaStable"),
        PoolType::ComposableStable | PoolType::PhantomStable => Some("ComposableStable"),
        PoolType::Gyro => Some("Gyro2"),
        PoolType::Gyro3 => Some("Gyro3"),
        PoolType::GyroE => Some("GyroE"),
        PoolType::CowAmm => Some("CowAmm"),
        PoolType::LiquidityBootstrapping => Some("LiquidityBootstrapping"),
        PoolType::Element => Some("Element"),
        PoolType::Fx => Some("Fx"),
        _ => None,
    }
}

fn sdk_pool_type(protocol_version: ProtocolVersion, pool_type: &PoolType) -> String {
    if protocol_version == ProtocolVersion::V3 {
        return pool_type.api_tag().to_string();
    }
    match legacy_sdk_pool_type(pool_type) {
        Some(mapped) => mapped.to_string(),
        None => {
            tracing::warn!(%pool_type, "No SDK pool type mapping, passing the API tag through");
            pool_type.api_tag().to_string()
        }
    }
}

pub fn to_pool_state(pool: &Pool) -> PoolState {
    PoolState {
        id: pool.id.clone(),
        address: pool.address,
        tokens: pool.tokens.iter().map(|t| t.to_minimal()).collect(),
        pool_type: sdk_pool_type(pool.protocol_version, &pool.pool_type),
        protocol_version: pool.protocol_version.as_u8(),
    }
}

pub fn to_boosted_pool_state(pool: &Pool) -> PoolStateWithUnderlyings {
    if !is_v3_pool(pool) {
        tracing::warn!(pool = %pool.id, "Boosted pool state requested for a pre-v3 pool");
    }

    let tokens = pool
        .tokens
        .iter()
        .map(|token| PoolTokenWithUnderlying {
            address: token.address,
            decimals: token.decimals,
            index: token.index,
            balance: token.balance.clone(),
            underlying_token: token
                .underlying_token
                .as_ref()
                .filter(|_| token.use_underlying_for_add_remove)
                .map(|underlying| UnderlyingTokenState {
                    address: underlying.address,
                    decimals: underlying.decimals,
                    index: token.index,
                }),
        })
        .collect();

    PoolStateWithUnderlyings {
        id: pool.id.clone(),
        address: pool.address,
        protocol_version: pool.protocol_version.as_u8(),
        pool_type: pool.pool_type.api_tag().to_string(),
        tokens,
        total_shares: pool.dynamic_data.total_shares.clone(),
    }
}

pub fn to_nested_pool_state(pool: &Pool) -> NestedPoolState {
    let version = pool.protocol_version;

    let mut pools: Vec<NestedPoolStatePool> = pool
        .tokens
        .iter()
        .filter_map(|token| token.nested_pool.as_ref())
        .map(|nested| NestedPoolStatePool {
            id: nested.id.clone(),
            address: nested.address,
            pool_type: sdk_pool_type(version, &nested.pool_type),
            level: 0,
            tokens: nested
                .tokens
                .iter()
                .map(|t| MinimalToken {
                    address: t.address,
                    decimals: t.decimals,
                    index: t.index,
                })
                .collect(),
        })
        .collect();
    pools.push(NestedPoolStatePool {
        id: pool.id.clone(),
        address: pool.address,
        pool_type: sdk_pool_type(version, &pool.pool_type),
        level: 1,
        tokens: pool.tokens.iter().map(|t| t.to_minimal()).collect(),
    });

    // Leaf tokens: anything that is not the share token of a pool in the tree.
    let bpt_addresses: Vec<Address> = pools.iter().map(|p| p.address).collect();
    let main_tokens = pools
        .iter()
        .flat_map(|p| p.tokens.iter())
        .filter(|t| !bpt_addresses.contains(&t.address))
        .unique_by(|t| t.address)
        .map(|t| MainToken {
            address: t.address,
            decimals: t.decimals,
        })
        .collect();

    NestedPoolState {
        protocol_version: version.as_u8(),
        pools,
        main_tokens,
    }
}

/// Helpers bound to one pool and the configuration of its chain.
#[derive(Debug, Clone, Copy)]
pub struct LiquidityActionHelpers<'a> {
    pub pool: &'a Pool,
    pub network: &'a NetworkConfig,
}

impl<'a> LiquidityActionHelpers<'a> {
    /// Fails with [`BalRsError::ConfigError`] when `network` is not the pool's chain.
    pub fn new(pool: &'a Pool, network: &'a NetworkConfig) -> Result<Self, BalRsError> {
        if pool.chain != network.chain {
            return Err(BalRsError::ConfigError(format!(
                "pool {} is on {} but the network configuration is for {}",
                pool.id, pool.chain, network.chain
            )));
        }
        Ok(Self { pool, network })
    }

    pub fn from_registry(pool: &'a Pool, registry: &'a NetworkRegistry) -> Result<Self, BalRsError> {
        Self::new(pool, registry.get(pool.chain)?)
    }

    pub fn pool_state(&self) -> PoolState {
        to_pool_state(self.pool)
    }

    pub fn nested_pool_state(&self) -> NestedPoolState {
        to_nested_pool_state(self.pool)
    }

    pub fn boosted_pool_state(&self) -> PoolStateWithUnderlyings {
        to_boosted_pool_state(self.pool)
    }

    pub fn chain_id(&self) -> u64 {
        self.network.chain_id
    }

    pub fn is_v3_pool(&self) -> bool {
        is_v3_pool(self.pool)
    }

    /// Converts non-empty amounts to raw amounts, keeping input order.
    pub fn to_input_amounts(
        &self,
        human_amounts_in: &[HumanTokenAmount],
    ) -> Result<Vec<InputAmount>, BalRsError> {
        if human_amounts_in.is_empty() {
            return Ok(Vec::new());
        }

        let all_tokens = self.pool.all_tokens();
        human_amounts_in
            .iter()
            .filter(|amount_in| !amount_in.is_empty())
            .map(|amount_in| self.to_input_amount(amount_in, &all_tokens))
            .collect()
    }

    fn to_input_amount(
        &self,
        amount_in: &HumanTokenAmount,
        all_tokens: &[KnownToken],
    ) -> Result<InputAmount, BalRsError> {
        if self.network.is_native_asset(amount_in.token_address) {
            let native = &self.network.native_asset;
            return Ok(InputAmount {
                address: amount_in.token_address,
                raw_amount: units::to_raw(&amount_in.human_amount, native.decimals)?,
                decimals: native.decimals,
                symbol: amount_in
                    .symbol
                    .clone()
                    .unwrap_or_else(|| native.symbol.clone()),
            });
        }

        let token = all_tokens
            .iter()
            .find(|t| t.address() == amount_in.token_address)
            .ok_or_else(|| {
                let pool_tokens = all_tokens.iter().map(|t| t.address).join(", ");
                tracing::error!(pool = %self.pool.id, token = %amount_in.token_address, "Token not found in pool");
                BalRsError::TokenNotFound {
                    address: amount_in.token_address,
                    pool_tokens,
                }
            })?;

        InputAmount::from_human(&amount_in.human_amount, token)
    }

    /// Input amounts with the native asset replaced by the wrapped native token.
    pub fn to_sdk_input_amounts(
        &self,
        human_amounts_in: &[HumanTokenAmount],
    ) -> Result<Vec<InputAmount>, BalRsError> {
        Ok(self
            .to_input_amounts(human_amounts_in)?
            .into_iter()
            .map(|amount| InputAmount {
                address: self.network.swap_native_with_wrapped(amount.address),
                ..amount
            })
            .collect())
    }

    pub fn amounts_to_approve(
        &self,
        human_amounts_in: &[HumanTokenAmount],
        is_permit2: bool,
    ) -> Result<Vec<TokenAmountToApprove>, BalRsError> {
        Ok(self
            .to_input_amounts(human_amounts_in)?
            .into_iter()
            .map(|amount| TokenAmountToApprove::from((amount, is_permit2)))
            .collect())
    }

    pub fn is_native_asset_in(&self, human_amounts_in: &[HumanTokenAmount]) -> bool {
        human_amounts_in
            .iter()
            .any(|amount_in| self.network.is_native_asset(amount_in.token_address))
    }

    pub fn is_native_asset(&self, token_address: Address) -> bool {
        self.network.is_native_asset(token_address)
    }
}

pub fn is_empty_amount(amount_in: &HumanTokenAmount) -> bool {
    amount_in.is_empty()
}

pub fn are_empty_amounts(human_amounts_in: &[HumanTokenAmount]) -> bool {
    human_amounts_in.iter().all(is_empty_amount)
}

/// Nested actions need nested pools and a pool id that is not on the chain's deny-list.
pub fn supports_nested_actions(pool: &Pool, network: &NetworkConfig) -> bool {
    if !has_nested_pools(pool) {
        return false;
    }
    !network.disallows_nested_actions(&pool.id)
}

/// Drops every amount for `token_address`, treating the native asset and the wrapped
/// native token as the same token in both directions.
pub fn filter_human_amounts_in(
    human_amounts_in: &[HumanTokenAmount],
    token_address: Address,
    network: &NetworkConfig,
) -> Vec<HumanTokenAmount> {
    human_amounts_in
        .iter()
        .filter(|amount_in| {
            let address = amount_in.token_address;
            address != token_address
                && !(network.is_native_asset(token_address)
                    && network.is_wrapped_native_asset(address))
                && !(network.is_native_asset(address)
                    && network.is_wrapped_native_asset(token_address))
        })
        .cloned()
        .collect()
}

/// Rounds every amount down to `max_decimals` fractional digits. Used before
/// proportional price impact queries so a user balance is never overstated.
pub fn round_decimals(
    human_amounts_in: &[HumanTokenAmount],
    max_decimals: u8,
) -> Result<Vec<HumanTokenAmount>, BalRsError> {
    human_amounts_in
        .iter()
        .map(|amount_in| {
            Ok(HumanTokenAmount {
                human_amount: units::round_down_to_fixed(&amount_in.human_amount, max_decimals)?,
                ..amount_in.clone()
            })
        })
        .collect()
}

pub fn empty_token_amounts(pool: &Pool) -> Vec<InputAmount> {
    pool.tokens
        .iter()
        .map(|token| InputAmount {
            address: token.address,
            raw_amount: U256::ZERO,
            decimals: token.decimals,
            symbol: token.symbol.clone(),
        })
        .collect()
}

pub fn should_show_native_wrapped_selector(
    token_address: Address,
    pool: &Pool,
    network: &NetworkConfig,
) -> bool {
    supports_weth_is_eth(pool, network) && network.is_native_or_wrapped_native(token_address)
}

pub fn replace_wrapped_with_native_asset(
    valid_tokens: Vec<KnownToken>,
    native_asset: Option<&KnownToken>,
    network: &NetworkConfig,
) -> Vec<KnownToken> {
    let Some(native_asset) = native_asset else {
        return valid_tokens;
    };
    valid_tokens
        .into_iter()
        .map(|token| {
            if network.is_wrapped_native_asset(token.address) {
                native_asset.clone()
            } else {
                token
            }
        })
        .collect()
}

/// Prepends the native asset when the wrapped native token is selectable.
/// CoW AMM pools cannot take the native asset.
pub fn inject_native_asset(
    valid_tokens: Vec<KnownToken>,
    native_asset: Option<&KnownToken>,
    pool: &Pool,
    network: &NetworkConfig,
) -> Vec<KnownToken> {
    let has_wrapped_native = valid_tokens
        .iter()
        .any(|token| network.is_wrapped_native_asset(token.address));

    match native_asset {
        Some(native) if has_wrapped_native && !is_cow_amm_pool(pool) => {
            std::iter::once(native.clone()).chain(valid_tokens).collect()
        }
        _ => valid_tokens,
    }
}

/// Returns the last query response, or reports and returns
/// [`BalRsError::MissingQueryResult`] when building call data ran ahead of its query.
pub fn ensure_last_query_response<Q>(
    liquidity_action_description: &str,
    query_response: Option<Q>,
    reporter: &dyn ErrorReporter,
) -> Result<Q, BalRsError> {
    query_response.ok_or_else(|| {
        let error = BalRsError::MissingQueryResult(liquidity_action_description.to_string());
        let context = ErrorContext::new(
            format!("Missing queryResponse in {liquidity_action_description}"),
            Severity::Fatal,
        )
        .with_extra("action", liquidity_action_description);
        reporter.capture(&error, &context);
        error
    })
}
