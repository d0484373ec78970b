//! Selection of the add/remove liquidity handler family for a pool.

use crate::{
    balancer::{
        adapter::supports_nested_actions,
        classifier::{
            is_boosted, is_cow_amm_pool, requires_proportional_input,
            should_use_recovery_remove_liquidity, supports_proportional_add_liquidity_kind,
        },
        pool::{Pool, ProtocolVersion},
    },
    core::token::HumanTokenAmount,
    network::NetworkConfig,
};
use alloy_primitives::Address;

/// How the user asked to add liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddLiquidityType {
    Unbalanced,
    Proportional,
}

/// How the user asked to remove liquidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveLiquidityType {
    Proportional,
    SingleToken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddLiquidityHandlerKind {
    Unbalanced(ProtocolVersion),
    Proportional(ProtocolVersion),
    /// Proportional amounts submitted through the unbalanced SDK kind, for pools
    /// where the SDK cannot build a proportional add.
    ProportionalAsUnbalanced(ProtocolVersion),
    Nested(ProtocolVersion),
    UnbalancedBoosted,
    ProportionalBoosted,
}

impl AddLiquidityHandlerKind {
    pub fn name(&self) -> &'static str {
        use ProtocolVersion::*;
        match self {
            AddLiquidityHandlerKind::Unbalanced(V3) => "UnbalancedAddLiquidityV3Handler",
            AddLiquidityHandlerKind::Unbalanced(_) => "UnbalancedAddLiquidityV2Handler",
            AddLiquidityHandlerKind::Proportional(V1) => "CowAmmProportionalAddLiquidityHandler",
            AddLiquidityHandlerKind::Proportional(V2) => "ProportionalAddLiquidityV2Handler",
            AddLiquidityHandlerKind::Proportional(V3) => "ProportionalAddLiquidityV3Handler",
            AddLiquidityHandlerKind::ProportionalAsUnbalanced(_) => {
                "ProportionalUnbalancedAddLiquidityV2Handler"
            }
            AddLiquidityHandlerKind::Nested(V3) => "NestedAddLiquidityV3Handler",
            AddLiquidityHandlerKind::Nested(_) => "NestedAddLiquidityV2Handler",
            AddLiquidityHandlerKind::UnbalancedBoosted => "UnbalancedAddLiquidityBoostedV3Handler",
            AddLiquidityHandlerKind::ProportionalBoosted => "ProportionalAddLiquidityBoostedV3Handler",
        }
    }

    pub fn is_proportional(&self) -> bool {
        matches!(
            self,
            AddLiquidityHandlerKind::Proportional(_)
                | AddLiquidityHandlerKind::ProportionalAsUnbalanced(_)
                | AddLiquidityHandlerKind::ProportionalBoosted
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveLiquidityHandlerKind {
    Recovery,
    Proportional(ProtocolVersion),
    SingleToken(ProtocolVersion),
    NestedProportional(ProtocolVersion),
    NestedSingleToken(ProtocolVersion),
    ProportionalBoosted,
}

impl RemoveLiquidityHandlerKind {
    pub fn name(&self) -> &'static str {
        use ProtocolVersion::*;
        match self {
            RemoveLiquidityHandlerKind::Recovery => "RecoveryRemoveLiquidityHandler",
            RemoveLiquidityHandlerKind::Proportional(V1) => {
                "CowAmmProportionalRemoveLiquidityHandler"
            }
            RemoveLiquidityHandlerKind::Proportional(V2) => "ProportionalRemoveLiquidityV2Handler",
            RemoveLiquidityHandlerKind::Proportional(V3) => "ProportionalRemoveLiquidityV3Handler",
            RemoveLiquidityHandlerKind::SingleToken(V3) => "SingleTokenRemoveLiquidityV3Handler",
            RemoveLiquidityHandlerKind::SingleToken(_) => "SingleTokenRemoveLiquidityV2Handler",
            RemoveLiquidityHandlerKind::NestedProportional(V3) => {
                "NestedProportionalRemoveLiquidityV3Handler"
            }
            RemoveLiquidityHandlerKind::NestedProportional(_) => {
                "NestedProportionalRemoveLiquidityV2Handler"
            }
            RemoveLiquidityHandlerKind::NestedSingleToken(V3) => {
                "NestedSingleTokenRemoveLiquidityV3Handler"
            }
            RemoveLiquidityHandlerKind::NestedSingleToken(_) => {
                "NestedSingleTokenRemoveLiquidityV2Handler"
            }
            RemoveLiquidityHandlerKind::ProportionalBoosted => {
                "ProportionalRemoveLiquidityBoostedV3Handler"
            }
        }
    }
}

/// Parameters of an add-liquidity query, as attached to error reports.
#[derive(Debug, Clone)]
pub struct AddLiquidityParams {
    pub user_address: Address,
    pub slippage: String,
    pub pool_id: String,
    pub pool_type: String,
    pub human_amounts_in: Vec<HumanTokenAmount>,
    pub chain_id: u64,
}

/// Parameters of a remove-liquidity query, as attached to error reports.
#[derive(Debug, Clone)]
pub struct RemoveLiquidityParams {
    pub user_address: Address,
    pub slippage: String,
    pub pool_id: String,
    pub human_bpt_in: String,
    pub chain_id: u64,
}

pub fn select_add_liquidity_handler(
    pool: &Pool,
    network: &NetworkConfig,
    requested: AddLiquidityType,
) -> AddLiquidityHandlerKind {
    let version = pool.protocol_version;
    let proportional =
        requested == AddLiquidityType::Proportional || requires_proportional_input(pool);

    let handler = if is_boosted(pool) {
        if proportional {
            AddLiquidityHandlerKind::ProportionalBoosted
        } else {
            AddLiquidityHandlerKind::UnbalancedBoosted
        }
    } else if supports_nested_actions(pool, network) {
        AddLiquidityHandlerKind::Nested(version)
    } else if proportional {
        if is_cow_amm_pool(pool) {
            AddLiquidityHandlerKind::Proportional(ProtocolVersion::V1)
        } else if supports_proportional_add_liquidity_kind(pool, network) {
            AddLiquidityHandlerKind::Proportional(version)
        } else {
            AddLiquidityHandlerKind::ProportionalAsUnbalanced(version)
        }
    } else {
        AddLiquidityHandlerKind::Unbalanced(version)
    };

    tracing::debug!(pool = %pool.id, ?requested, handler = handler.name(), "Selected add liquidity handler");
    handler
}

pub fn select_remove_liquidity_handler(
    pool: &Pool,
    network: &NetworkConfig,
    requested: RemoveLiquidityType,
) -> RemoveLiquidityHandlerKind {
    let version = pool.protocol_version;
    let single_token = requested == RemoveLiquidityType::SingleToken;

    let handler = if should_use_recovery_remove_liquidity(pool, network) {
        RemoveLiquidityHandlerKind::Recovery
    } else if supports_nested_actions(pool, network) {
        if single_token {
            RemoveLiquidityHandlerKind::NestedSingleToken(version)
        } else {
            RemoveLiquidityHandlerKind::NestedProportional(version)
        }
    } else if is_boosted(pool) {
        RemoveLiquidityHandlerKind::ProportionalBoosted
    } else if single_token && !requires_proportional_input(pool) {
        RemoveLiquidityHandlerKind::SingleToken(version)
    } else {
        RemoveLiquidityHandlerKind::Proportional(version)
    };

    if single_token && !matches!(
        handler,
        RemoveLiquidityHandlerKind::SingleToken(_) | RemoveLiquidityHandlerKind::NestedSingleToken(_)
    ) {
        tracing::debug!(pool = %pool.id, handler = handler.name(), "Single token removal not available, falling back");
    }
    handler
}
