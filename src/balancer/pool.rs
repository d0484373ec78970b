use crate::{
    TokenLike,
    balancer::api::{ApiPool, ApiPoolToken},
    core::token::{KnownToken, MinimalToken},
    errors::BalRsError,
    math::units,
    network::Chain,
};
use alloy_primitives::Address;
use itertools::Itertools;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProtocolVersion {
    /// CoW AMM pools.
    V1,
    V2,
    V3,
}

impl ProtocolVersion {
    pub fn as_u8(self) -> u8 {
        match self {
            ProtocolVersion::V1 => 1,
            ProtocolVersion::V2 => 2,
            ProtocolVersion::V3 => 3,
        }
    }
}

impl TryFrom<u8> for ProtocolVersion {
    type Error = BalRsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProtocolVersion::V1),
            2 => Ok(ProtocolVersion::V2),
            3 => Ok(ProtocolVersion::V3),
            other => Err(BalRsError::InvalidPool(
                "protocolVersion".into(),
                format!("unsupported protocol version {other}"),
            )),
        }
    }
}

/// The pool family tag reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PoolType {
    Weighted,
    Stable,
    MetaStable,
    ComposableStable,
    PhantomStable,
    Gyro,
    Gyro3,
    GyroE,
    CowAmm,
    LiquidityBootstrapping,
    Element,
    Fx,
    Investment,
    Linear,
    Quantamm,
    Reclamm,
    Unknown(String),
}

impl PoolType {
    pub fn from_api_tag(tag: &str) -> Self {
        match tag {
            "WEIGHTED" => PoolType::Weighted,
            "STABLE" => PoolType::Stable,
            "META_STABLE" => PoolType::MetaStable,
            "COMPOSABLE_STABLE" => PoolType::ComposableStable,
            "PHANTOM_STABLE" => PoolType::PhantomStable,
            "GYRO" => PoolType::Gyro,
            "GYRO3" => PoolType::Gyro3,
            "GYROE" => PoolType::GyroE,
            "COW_AMM" => PoolType::CowAmm,
            "LIQUIDITY_BOOTSTRAPPING" => PoolType::LiquidityBootstrapping,
            "ELEMENT" => PoolType::Element,
            "FX" => PoolType::Fx,
            "INVESTMENT" => PoolType::Investment,
            "LINEAR" => PoolType::Linear,
            "QUANT_AMM_WEIGHTED" => PoolType::Quantamm,
            "RECLAMM" => PoolType::Reclamm,
            other => PoolType::Unknown(other.to_string()),
        }
    }

    pub fn api_tag(&self) -> &str {
        match self {
            PoolType::Weighted => "WEIGHTED",
            PoolType::Stable => "STABLE",
            PoolType::MetaStable => "META_STABLE",
            PoolType::ComposableStable => "COMPOSABLE_STABLE",
            PoolType::PhantomStable => "PHANTOM_STABLE",
            PoolType::Gyro => "GYRO",
            PoolType::Gyro3 => "GYRO3",
            PoolType::GyroE => "GYROE",
            PoolType::CowAmm => "COW_AMM",
            PoolType::LiquidityBootstrapping => "LIQUIDITY_BOOTSTRAPPING",
            PoolType::Element => "ELEMENT",
            PoolType::Fx => "FX",
            PoolType::Investment => "INVESTMENT",
            PoolType::Linear => "LINEAR",
            PoolType::Quantamm => "QUANT_AMM_WEIGHTED",
            PoolType::Reclamm => "RECLAMM",
            PoolType::Unknown(tag) => tag,
        }
    }

    pub fn gyro_variant(&self) -> Option<GyroVariant> {
        match self {
            PoolType::Gyro => Some(GyroVariant::TwoClp),
            PoolType::Gyro3 => Some(GyroVariant::ThreeClp),
            PoolType::GyroE => Some(GyroVariant::Eclp),
            _ => None,
        }
    }
}

impl fmt::Display for PoolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GyroVariant {
    TwoClp,
    ThreeClp,
    Eclp,
}

/// One variant per protocol version and pool family combination that the
/// liquidity helpers treat specially. Everything else is `Unclassified`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PoolKind {
    CowAmmV1,
    WeightedV2 { factory: Option<Address> },
    StableV2,
    MetaStableV2,
    ComposableStableV2 { factory_version: Option<u32> },
    GyroV2(GyroVariant),
    WeightedV3,
    StableV3,
    GyroV3(GyroVariant),
    Unclassified {
        protocol_version: ProtocolVersion,
        pool_type: PoolType,
    },
}

impl PoolKind {
    pub fn classify(
        protocol_version: ProtocolVersion,
        pool_type: &PoolType,
        factory_version: Option<u32>,
        factory: Option<Address>,
    ) -> Self {
        use ProtocolVersion::*;

        match (protocol_version, pool_type, pool_type.gyro_variant()) {
            (V2, _, Some(variant)) => PoolKind::GyroV2(variant),
            (V3, _, Some(variant)) => PoolKind::GyroV3(variant),
            (V1, PoolType::CowAmm, _) => PoolKind::CowAmmV1,
            (V2, PoolType::Weighted, _) => PoolKind::WeightedV2 { factory },
            (V2, PoolType::Stable, _) => PoolKind::StableV2,
            (V2, PoolType::MetaStable, _) => PoolKind::MetaStableV2,
            (V2, PoolType::ComposableStable, _) => PoolKind::ComposableStableV2 { factory_version },
            (V3, PoolType::Weighted, _) => PoolKind::WeightedV3,
            (V3, PoolType::Stable, _) => PoolKind::StableV3,
            (protocol_version, pool_type, _) => PoolKind::Unclassified {
                protocol_version,
                pool_type: pool_type.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicData {
    pub total_shares: String,
    pub is_in_recovery_mode: bool,
    pub is_paused: bool,
    pub swap_fee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnderlyingToken {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedPoolToken {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub index: usize,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedPool {
    pub id: String,
    pub address: Address,
    pub pool_type: PoolType,
    pub total_shares: Option<String>,
    pub tokens: Vec<NestedPoolToken>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolToken {
    pub address: Address,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub index: usize,
    pub balance: String,
    pub weight: Option<String>,
    pub nested_pool: Option<NestedPool>,
    pub is_erc4626: bool,
    /// When set, `underlying_token` is guaranteed to be present.
    pub use_underlying_for_add_remove: bool,
    pub underlying_token: Option<UnderlyingToken>,
}

macro_rules! impl_token_like {
    ($($ty:ty),*) => {
        $(impl TokenLike for $ty {
            fn address(&self) -> Address {
                self.address
            }
            fn symbol(&self) -> &str {
                &self.symbol
            }
            fn decimals(&self) -> u8 {
                self.decimals
            }
        })*
    };
}

impl_token_like!(PoolToken, NestedPoolToken, UnderlyingToken);

impl PoolToken {
    pub fn to_minimal(&self) -> MinimalToken {
        MinimalToken {
            address: self.address,
            decimals: self.decimals,
            index: self.index,
        }
    }
}

/// A validated pool record. Tokens are ordered by index and have unique addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    pub id: String,
    pub address: Address,
    pub name: String,
    pub chain: Chain,
    pub protocol_version: ProtocolVersion,
    pub pool_type: PoolType,
    pub kind: PoolKind,
    pub version: Option<u32>,
    pub factory: Option<Address>,
    pub has_erc4626: bool,
    pub disable_unbalanced_liquidity: bool,
    pub dynamic_data: DynamicData,
    pub tokens: Vec<PoolToken>,
}

impl Pool {
    pub fn from_json(json: &str) -> Result<Self, BalRsError> {
        let api_pool: ApiPool = serde_json::from_str(json)?;
        Pool::try_from(api_pool)
    }

    pub fn token(&self, address: Address) -> Option<&PoolToken> {
        self.tokens.iter().find(|t| t.address == address)
    }

    /// Every token a user can provide or receive: pool tokens, the tokens of nested
    /// pools and underlying tokens, first occurrence wins.
    pub fn all_tokens(&self) -> Vec<KnownToken> {
        self.tokens
            .iter()
            .flat_map(|token| {
                let own = std::iter::once(known(token));
                let nested = token
                    .nested_pool
                    .iter()
                    .flat_map(|nested| nested.tokens.iter().map(known));
                let underlying = token.underlying_token.iter().map(known);
                own.chain(nested).chain(underlying)
            })
            .unique_by(|token| token.address)
            .collect()
    }

    pub fn total_shares_is_zero(&self) -> bool {
        units::is_empty_human_amount(&self.dynamic_data.total_shares)
    }
}

fn known<T: TokenLike>(token: &T) -> KnownToken {
    KnownToken {
        address: token.address(),
        symbol: token.symbol().to_string(),
        decimals: token.decimals(),
    }
}

impl TryFrom<ApiPool> for Pool {
    type Error = BalRsError;

    fn try_from(api: ApiPool) -> Result<Self, Self::Error> {
        let protocol_version = ProtocolVersion::try_from(api.protocol_version).map_err(|_| {
            BalRsError::InvalidPool(
                api.id.clone(),
                format!("unsupported protocol version {}", api.protocol_version),
            )
        })?;
        let pool_type = PoolType::from_api_tag(&api.pool_type);
        let kind = PoolKind::classify(protocol_version, &pool_type, api.version, api.factory);

        if let Some(duplicate) = api.pool_tokens.iter().map(|t| t.address).duplicates().next() {
            return Err(BalRsError::InvalidPool(
                api.id,
                format!("duplicate token address {duplicate}"),
            ));
        }

        let mut tokens = api
            .pool_tokens
            .into_iter()
            .map(|token| convert_token(&api.id, token))
            .collect::<Result<Vec<_>, _>>()?;
        tokens.sort_by_key(|t| t.index);

        if matches!(kind, PoolKind::Unclassified { .. }) {
            tracing::trace!(pool = %api.id, pool_type = %pool_type, "Pool has no special-cased kind");
        }

        Ok(Pool {
            id: api.id,
            address: api.address,
            name: api.name,
            chain: api.chain,
            protocol_version,
            pool_type,
            kind,
            version: api.version,
            factory: api.factory,
            has_erc4626: api.has_erc4626,
            disable_unbalanced_liquidity: api
                .liquidity_management
                .and_then(|lm| lm.disable_unbalanced_liquidity)
                .unwrap_or(false),
            dynamic_data: DynamicData {
                total_shares: api.dynamic_data.total_shares,
                is_in_recovery_mode: api.dynamic_data.is_in_recovery_mode,
                is_paused: api.dynamic_data.is_paused,
                swap_fee: api.dynamic_data.swap_fee,
            },
            tokens,
        })
    }
}

fn convert_token(pool_id: &str, token: ApiPoolToken) -> Result<PoolToken, BalRsError> {
    let use_underlying = token.use_underlying_for_add_remove.unwrap_or(false);
    if use_underlying && token.underlying_token.is_none() {
        return Err(BalRsError::InvalidPool(
            pool_id.to_string(),
            format!(
                "token {} uses its underlying for add/remove but has no underlying token",
                token.address
            ),
        ));
    }

    let nested_pool = token.nested_pool.map(|nested| {
        let mut tokens: Vec<NestedPoolToken> = nested
            .tokens
            .into_iter()
            .map(|t| NestedPoolToken {
                address: t.address,
                symbol: t.symbol,
                decimals: t.decimals,
                index: t.index,
                balance: t.balance,
            })
            .collect();
        tokens.sort_by_key(|t| t.index);
        NestedPool {
            id: nested.id,
            address: nested.address,
            pool_type: PoolType::from_api_tag(&nested.pool_type),
            total_shares: nested.total_shares,
            tokens,
        }
    });

    Ok(PoolToken {
        address: token.address,
        symbol: token.symbol,
        name: token.name,
        decimals: token.decimals,
        index: token.index,
        balance: token.balance,
        weight: token.weight,
        nested_pool,
        is_erc4626: token.is_erc4626.unwrap_or(false),
        use_underlying_for_add_remove: use_underlying,
        underlying_token: token.underlying_token.map(|u| UnderlyingToken {
            address: u.address,
            symbol: u.symbol,
            decimals: u.decimals,
        }),
    })
}
