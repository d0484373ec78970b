use crate::errors::BalRsError;
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub mod defaults;

/// Chains as named by the Balancer API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Chain {
    Mainnet,
    Arbitrum,
    Avalanche,
    Base,
    Gnosis,
    Optimism,
    Polygon,
    Sepolia,
    Sonic,
    Fraxtal,
    Mode,
    Zkevm,
}

impl Chain {
    pub const ALL: [Chain; 12] = [
        Chain::Mainnet,
        Chain::Arbitrum,
        Chain::Avalanche,
        Chain::Base,
        Chain::Gnosis,
        Chain::Optimism,
        Chain::Polygon,
        Chain::Sepolia,
        Chain::Sonic,
        Chain::Fraxtal,
        Chain::Mode,
        Chain::Zkevm,
    ];
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Chain::Mainnet => "MAINNET",
            Chain::Arbitrum => "ARBITRUM",
            Chain::Avalanche => "AVALANCHE",
            Chain::Base => "BASE",
            Chain::Gnosis => "GNOSIS",
            Chain::Optimism => "OPTIMISM",
            Chain::Polygon => "POLYGON",
            Chain::Sepolia => "SEPOLIA",
            Chain::Sonic => "SONIC",
            Chain::Fraxtal => "FRAXTAL",
            Chain::Mode => "MODE",
            Chain::Zkevm => "ZKEVM",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeAsset {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
}

/// Per-chain settings the pool helpers depend on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub chain: Chain,
    pub chain_id: u64,
    pub native_asset: NativeAsset,
    pub wrapped_native_asset: Address,
    /// Balancer v2 `WeightedPool2TokensFactory`, when deployed on this chain.
    #[serde(default)]
    pub weighted_pool_2_tokens_factory: Option<Address>,
    /// Nested pools whose nested add/remove flows are known to misbehave.
    #[serde(default)]
    pub disallow_nested_actions: Vec<String>,
    /// Composable stable pools flagged by the CSP vulnerability disclosure.
    #[serde(default)]
    pub csp_issue_pool_ids: Vec<String>,
}

impl NetworkConfig {
    pub fn is_native_asset(&self, address: Address) -> bool {
        address == self.native_asset.address
    }

    pub fn is_wrapped_native_asset(&self, address: Address) -> bool {
        address == self.wrapped_native_asset
    }

    pub fn is_native_or_wrapped_native(&self, address: Address) -> bool {
        self.is_native_asset(address) || self.is_wrapped_native_asset(address)
    }

    /// Maps the native asset placeholder to the wrapped token; other addresses pass through.
    pub fn swap_native_with_wrapped(&self, address: Address) -> Address {
        if self.is_native_asset(address) {
            self.wrapped_native_asset
        } else {
            address
        }
    }

    pub fn disallows_nested_actions(&self, pool_id: &str) -> bool {
        contains_pool_id(&self.disallow_nested_actions, pool_id)
    }

    pub fn has_csp_issue(&self, pool_id: &str) -> bool {
        contains_pool_id(&self.csp_issue_pool_ids, pool_id)
    }
}

fn contains_pool_id(ids: &[String], pool_id: &str) -> bool {
    ids.iter().any(|id| id.eq_ignore_ascii_case(pool_id))
}

/// Lookup of [`NetworkConfig`] by chain. Starts from the built-in table and can be
/// overridden per chain from JSON.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    configs: HashMap<Chain, NetworkConfig>,
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        let configs = defaults::BUILTIN_NETWORKS
            .iter()
            .map(|config| (config.chain, config.clone()))
            .collect();
        Self { configs }
    }
}

impl NetworkRegistry {
    pub fn empty() -> Self {
        Self {
            configs: HashMap::new(),
        }
    }

    /// Built-in networks with the entries from `json` (an array of network configs)
    /// replacing the built-in entry for the same chain.
    pub fn from_json_str(json: &str) -> Result<Self, BalRsError> {
        let overrides: Vec<NetworkConfig> = serde_json::from_str(json)?;
        let mut registry = Self::default();
        for config in overrides {
            tracing::debug!(chain = %config.chain, "Overriding network configuration");
            registry.insert(config)?;
        }
        Ok(registry)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BalRsError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&contents)
    }

    pub fn insert(&mut self, config: NetworkConfig) -> Result<(), BalRsError> {
        if config.native_asset.address == config.wrapped_native_asset {
            return Err(BalRsError::ConfigError(format!(
                "{}: native and wrapped native assets must differ",
                config.chain
            )));
        }
        self.configs.insert(config.chain, config);
        Ok(())
    }

    pub fn get(&self, chain: Chain) -> Result<&NetworkConfig, BalRsError> {
        self.configs
            .get(&chain)
            .ok_or_else(|| BalRsError::UnsupportedChain(chain.to_string()))
    }

    pub fn chains(&self) -> impl Iterator<Item = Chain> + '_ {
        self.configs.keys().copied()
    }
}
