//! Predicates over a [`Pool`] that decide special-case liquidity behaviour.
//!
//! Every predicate is total: a pool whose kind is not recognised takes the branch a
//! plain, non-special-cased pool would take. Predicates that depend on per-chain data
//! receive the [`NetworkConfig`] explicitly.

use crate::balancer::pool::{Pool, PoolKind, PoolType, ProtocolVersion};
use crate::network::NetworkConfig;

pub fn is_v2_pool(pool: &Pool) -> bool {
    pool.protocol_version == ProtocolVersion::V2
}

pub fn is_v3_pool(pool: &Pool) -> bool {
    pool.protocol_version == ProtocolVersion::V3
}

pub fn is_cow_amm_pool(pool: &Pool) -> bool {
    match &pool.kind {
        PoolKind::CowAmmV1 => true,
        PoolKind::Unclassified { pool_type, .. } => *pool_type == PoolType::CowAmm,
        _ => false,
    }
}

pub fn is_gyro(pool: &Pool) -> bool {
    match &pool.kind {
        PoolKind::GyroV2(_) | PoolKind::GyroV3(_) => true,
        PoolKind::Unclassified { pool_type, .. } => pool_type.gyro_variant().is_some(),
        _ => false,
    }
}

/// Composable stable pools from the first factory are all in recovery mode, whatever
/// their flag says.
pub fn is_composable_stable_v1(pool: &Pool) -> bool {
    matches!(
        pool.kind,
        PoolKind::ComposableStableV2 {
            factory_version: Some(1)
        }
    )
}

pub fn has_nested_pools(pool: &Pool) -> bool {
    pool.tokens.iter().any(|token| token.nested_pool.is_some())
}

pub fn is_unbalanced_liquidity_disabled(pool: &Pool) -> bool {
    pool.disable_unbalanced_liquidity
}

pub fn is_affected_by_csp_issue(pool: &Pool, network: &NetworkConfig) -> bool {
    network.has_csp_issue(&pool.id)
}

/// v3 pools holding at least one ERC-4626 wrapper.
pub fn is_boosted(pool: &Pool) -> bool {
    is_v3_pool(pool) && (pool.has_erc4626 || pool.tokens.iter().any(|t| t.is_erc4626))
}

/// Pools that only accept proportional amounts; input must be restricted accordingly.
pub fn requires_proportional_input(pool: &Pool) -> bool {
    if is_v3_pool(pool) && is_unbalanced_liquidity_disabled(pool) {
        return true;
    }
    is_gyro(pool) || is_cow_amm_pool(pool)
}

pub fn is_weighted_pool_2_tokens(pool: &Pool, network: &NetworkConfig) -> bool {
    match (&pool.kind, network.weighted_pool_2_tokens_factory) {
        (
            PoolKind::WeightedV2 {
                factory: Some(factory),
            },
            Some(legacy_factory),
        ) => *factory == legacy_factory,
        _ => false,
    }
}

/// The SDK cannot build a proportional add for v2 stable/meta-stable pools or for
/// pools from the legacy two-token weighted factory.
pub fn supports_proportional_add_liquidity_kind(pool: &Pool, network: &NetworkConfig) -> bool {
    if matches!(pool.kind, PoolKind::StableV2 | PoolKind::MetaStableV2) {
        return false;
    }
    !is_weighted_pool_2_tokens(pool, network)
}

pub fn should_use_recovery_remove_liquidity(pool: &Pool, network: &NetworkConfig) -> bool {
    if is_composable_stable_v1(pool) {
        return true;
    }

    let dynamic = &pool.dynamic_data;
    if dynamic.is_in_recovery_mode {
        return true;
    }

    // Both conditions below are subsumed by the recovery check above.
    if dynamic.is_in_recovery_mode && dynamic.is_paused {
        return true;
    }
    if dynamic.is_in_recovery_mode && is_affected_by_csp_issue(pool, network) {
        return true;
    }

    false
}

/// Whether the native asset may stand in for the wrapped native token of the pool.
pub fn supports_weth_is_eth(pool: &Pool, network: &NetworkConfig) -> bool {
    if is_cow_amm_pool(pool) {
        return false;
    }
    pool.tokens
        .iter()
        .any(|token| network.is_wrapped_native_asset(token.address))
}

pub fn has_no_liquidity(pool: &Pool) -> bool {
    pool.total_shares_is_zero()
}
